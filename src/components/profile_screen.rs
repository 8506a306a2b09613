use yew::prelude::*;

use super::app::SyncContext;
use crate::model::PlayerState;
use crate::profile::{Tier, badges, completed_tasks, experience_percent, task_completion_percent};
use crate::util::format_amount;

#[derive(Properties, PartialEq, Clone)]
pub struct ProfileScreenProps {
    pub game: UseReducerHandle<PlayerState>,
}

fn stat(label: &str, value: String) -> Html {
    html! {
        <div style="flex:1 1 40%; background:#161b22; border-radius:10px; padding:10px; text-align:center;">
            <div style="font-size:18px; font-weight:700;">{ value }</div>
            <div style="font-size:12px; opacity:0.7;">{ label.to_string() }</div>
        </div>
    }
}

#[function_component(ProfileScreen)]
pub fn profile_screen(props: &ProfileScreenProps) -> Html {
    let sync = use_context::<SyncContext>();
    let game = &props.game;
    let tier = Tier::for_earnings(game.total_earnings);

    // Wipes the saved snapshot and starts over from a fresh page.
    let on_reset = Callback::from(move |_: MouseEvent| {
        let Some(window) = web_sys::window() else { return };
        if !window.confirm_with_message("Reset all progress?").unwrap_or(false) {
            return;
        }
        if let Some(sync) = sync.as_ref() {
            if let Err(err) = sync.store.clear() {
                tracing::error!(error = %err, "could not clear saved game");
                return;
            }
        }
        tracing::info!("progress reset");
        if let Err(err) = window.location().reload() {
            tracing::warn!(error = ?err, "reload failed");
        }
    });

    html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:14px;">
            <div style="text-align:center;">
                <div style="font-size:22px; font-weight:700;">{ game.display_name() }</div>
                if let Some(username) = game.username.clone() {
                    <div style="font-size:12px; opacity:0.7;">{ format!("@{}", username) }</div>
                }
                <div style={format!("color:{}; font-weight:600; margin-top:4px;", tier.color())}>
                    { format!("{} tier", tier.name()) }
                </div>
                <div style="font-size:12px; opacity:0.7;">
                    { format!("Level {} · {}% to next", game.level, experience_percent(game)) }
                </div>
            </div>
            <div style="display:flex; flex-wrap:wrap; gap:8px;">
                { stat("Total earned", format_amount(game.total_earnings)) }
                { stat("Taps", format_amount(game.taps_count)) }
                { stat("TON", format_amount(game.ton_coins)) }
                { stat("Friends", game.referrals.len().to_string()) }
                { stat("Tasks", format!("{}/{} ({}%)", completed_tasks(game), game.tasks.len(), task_completion_percent(game))) }
                { stat("Per tap", format_amount(game.coins_per_tap)) }
            </div>
            <h3 style="margin:0; font-size:14px;">{"Badges"}</h3>
            <div style="display:flex; flex-wrap:wrap; gap:8px;">
                { for badges(game).into_iter().map(|b| {
                    let opacity = if b.earned { "1" } else { "0.35" };
                    html! {
                        <div key={b.id} title={b.description} style={format!("flex:1 1 30%; background:#161b22; border:1px solid #30363d; border-radius:10px; padding:8px; text-align:center; font-size:12px; opacity:{};", opacity)}>
                            { b.name }
                        </div>
                    }
                }) }
            </div>
            <button onclick={on_reset} style="margin-top:10px; background:#da3633; color:white; border:none; border-radius:8px; padding:10px;">
                {"Reset progress"}
            </button>
        </div>
    }
}
