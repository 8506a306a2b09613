use yew::platform::spawn_local;
use yew::prelude::*;

use super::app::{SyncContext, Tab};
use crate::model::{BoostKind, PlayerState};
use crate::profile::{energy_percent, experience_percent};
use crate::sync::resolve_taps;
use crate::util::{format_amount, format_remaining, now_ms};

#[derive(Properties, PartialEq, Clone)]
pub struct TapScreenProps {
    pub game: UseReducerHandle<PlayerState>,
    pub on_navigate: Callback<Tab>,
}

fn bar(percent: u32, color: &str) -> Html {
    html! {
        <div style="height:8px; background:#30363d; border-radius:4px; overflow:hidden;">
            <div style={format!("width:{}%; height:100%; background:{};", percent, color)}></div>
        </div>
    }
}

#[function_component(TapScreen)]
pub fn tap_screen(props: &TapScreenProps) -> Html {
    let sync = use_context::<SyncContext>();
    let game = &props.game;

    let on_tap = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| {
            if game.energy == 0 {
                return;
            }
            let game = game.clone();
            let api = sync.as_ref().and_then(|s| s.api.clone());
            let user_id = game.user_id;
            spawn_local(async move {
                for action in resolve_taps(api.as_deref(), user_id, 1).await {
                    game.dispatch(action);
                }
            });
        })
    };

    let now = now_ms();
    let tap_boost = game.boosts.slot(BoostKind::TapPower);
    let per_tap = game.tap_yield(now);
    let boost_note = if tap_boost.is_active(now) {
        html! { <div style="color:#3fb950; font-size:12px;">{ format!("2x tap power · {}", format_remaining(tap_boost.expiry, now)) }</div> }
    } else {
        html! {}
    };

    let go = |tab: Tab| {
        let cb = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| cb.emit(tab))
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:18px; padding:20px 16px;">
            <div style="text-align:center;">
                <div style="font-size:34px; font-weight:700; color:#d4af37;">{ format_amount(game.coins) }</div>
                <div style="font-size:13px; opacity:0.7;">{ format!("+{} per tap", per_tap) }</div>
                { boost_note }
            </div>
            <button onclick={on_tap} disabled={game.energy == 0}
                style="width:200px; height:200px; border-radius:50%; border:6px solid #facc15; background:radial-gradient(circle, #fde047, #ca8a04); font-size:64px; cursor:pointer;">
                {"🪙"}
            </button>
            <div style="width:100%; max-width:360px; display:flex; flex-direction:column; gap:6px;">
                <div style="display:flex; justify-content:space-between; font-size:13px;">
                    <span>{"⚡ Energy"}</span>
                    <span>{ format!("{} / {}", game.energy, game.max_energy) }</span>
                </div>
                { bar(energy_percent(game), "#58a6ff") }
                <div style="display:flex; justify-content:space-between; font-size:13px; margin-top:8px;">
                    <span>{ format!("Level {}", game.level) }</span>
                    <span>{ format!("{} / {} XP", format_amount(game.experience), format_amount(game.experience_to_next)) }</span>
                </div>
                { bar(experience_percent(game), "#a371f7") }
            </div>
            <div style="display:flex; gap:10px;">
                <button onclick={go(Tab::Games)}>{"🎮 Play Games"}</button>
                <button onclick={go(Tab::Boosts)}>{"⚡ Boosts"}</button>
            </div>
        </div>
    }
}
