use yew::prelude::*;

use super::interval::Interval;
use crate::model::{BOOST_OFFERS, PlayerState};
use crate::reducer::GameAction;
use crate::util::{format_amount, format_remaining, now_ms};

#[derive(Properties, PartialEq, Clone)]
pub struct BoostScreenProps {
    pub game: UseReducerHandle<PlayerState>,
}

#[function_component(BoostScreen)]
pub fn boost_screen(props: &BoostScreenProps) -> Html {
    // Local clock so countdowns refresh between state changes
    let now = use_state(now_ms);
    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let ticker = Interval::start(1000, move || now.set(now_ms()));
            move || drop(ticker)
        });
    }
    let game = &props.game;

    html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:12px;">
            <h2 style="margin:0;">{"Boosts"}</h2>
            { for BOOST_OFFERS.iter().map(|offer| {
                let slot = game.boosts.slot(offer.kind);
                let active = slot.is_active(*now);
                let affordable = game.coins >= offer.cost;
                let onclick = {
                    let game = game.clone();
                    let (kind, cost) = (offer.kind, offer.cost);
                    Callback::from(move |_| {
                        if game.coins < cost {
                            return;
                        }
                        if let Some(action) = GameAction::purchase_boost(kind) {
                            game.dispatch(action);
                        }
                    })
                };
                let status = if active {
                    html! { <span style="color:#3fb950;">{ format!("Active {}", format_remaining(slot.expiry, *now)) }</span> }
                } else {
                    html! { <span style="opacity:0.7;">{ format!("{}m", offer.duration_ms / 60_000) }</span> }
                };
                html! {
                    <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; justify-content:space-between; align-items:center; gap:10px;">
                        <div style="display:flex; flex-direction:column; gap:4px;">
                            <strong>{ offer.title }</strong>
                            <span style="font-size:12px; opacity:0.8;">{ offer.description }</span>
                            <span style="font-size:12px;">{ status }</span>
                        </div>
                        <button {onclick} disabled={active || !affordable} style="min-width:90px;">
                            { format!("🪙 {}", format_amount(offer.cost)) }
                        </button>
                    </div>
                }
            }) }
        </div>
    }
}
