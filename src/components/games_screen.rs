use yew::platform::spawn_local;
use yew::prelude::*;

use super::app::SyncContext;
use crate::minigame::{CoinSide, MinigameKind, MinigamePlay, STAKE_OPTIONS};
use crate::model::PlayerState;
use crate::reducer::GameAction;
use crate::sync::resolve_minigame;
use crate::util::format_amount;

#[derive(Properties, PartialEq, Clone)]
pub struct GamesScreenProps {
    pub game: UseReducerHandle<PlayerState>,
}

fn describe(play: MinigamePlay, action: &GameAction) -> String {
    match action {
        GameAction::MinigameResult { result, .. } => {
            let net = result.net(play.stake());
            let mut msg = if net > 0 {
                format!("Won {} coins", net)
            } else if net == 0 {
                "Broke even".to_string()
            } else {
                format!("Lost {} coins", -net)
            };
            if result.ton_coins > 0 {
                msg.push_str(&format!(" + {} TON", result.ton_coins));
            }
            msg
        }
        _ => "Settled by the server".to_string(),
    }
}

#[function_component(GamesScreen)]
pub fn games_screen(props: &GamesScreenProps) -> Html {
    let sync = use_context::<SyncContext>();
    let stake = use_state(|| STAKE_OPTIONS[0]);
    let busy = use_state(|| false);
    let last_result = use_state(|| None::<String>);
    let game = &props.game;

    let play = {
        let game = game.clone();
        let busy = busy.clone();
        let last_result = last_result.clone();
        Callback::from(move |play: MinigamePlay| {
            if *busy || game.coins < play.stake() {
                return;
            }
            busy.set(true);
            let game = game.clone();
            let busy = busy.clone();
            let last_result = last_result.clone();
            let api = sync.as_ref().and_then(|s| s.api.clone());
            let user_id = game.user_id;
            spawn_local(async move {
                let mut rng = rand::thread_rng();
                let action = resolve_minigame(api.as_deref(), user_id, play, &mut rng).await;
                last_result.set(Some(format!("{}: {}", play.kind().label(), describe(play, &action))));
                game.dispatch(action);
                busy.set(false);
            });
        })
    };

    let stake_buttons = STAKE_OPTIONS.iter().map(|&amount| {
        let stake = stake.clone();
        let selected = *stake == amount;
        let onclick = Callback::from(move |_| stake.set(amount));
        let border = if selected { "#d4af37" } else { "#30363d" };
        html! {
            <button {onclick} disabled={game.coins < amount} style={format!("border:1px solid {};", border)}>
                { format_amount(amount) }
            </button>
        }
    });

    let button = |label: &str, play_fn: MinigamePlay| {
        let cb = play.clone();
        let onclick = Callback::from(move |_| cb.emit(play_fn));
        html! {
            <button {onclick} disabled={*busy || game.coins < play_fn.stake()} style="flex:1;">{ label.to_string() }</button>
        }
    };

    let current = *stake;
    html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:14px;">
            <h2 style="margin:0;">{"Games"}</h2>
            <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for stake_buttons }</div>
            <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; flex-direction:column; gap:8px;">
                <strong>{ MinigameKind::Spin.label() }</strong>
                <span style="font-size:12px; opacity:0.8;">{"Up to 10x your stake, 2% chance of TON"}</span>
                { button("Spin", MinigamePlay::Spin { stake: current }) }
            </div>
            <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; flex-direction:column; gap:8px;">
                <strong>{ MinigameKind::TreasureHunt.label() }</strong>
                <span style="font-size:12px; opacity:0.8;">{"40% chance to find treasure, rewards 3x-10x"}</span>
                { button("Hunt", MinigamePlay::TreasureHunt { stake: current }) }
            </div>
            <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; flex-direction:column; gap:8px;">
                <strong>{ MinigameKind::CoinFlip.label() }</strong>
                <span style="font-size:12px; opacity:0.8;">{"Guess right to double your stake"}</span>
                <div style="display:flex; gap:8px;">
                    { button("Heads", MinigamePlay::CoinFlip { stake: current, guess: CoinSide::Heads }) }
                    { button("Tails", MinigamePlay::CoinFlip { stake: current, guess: CoinSide::Tails }) }
                </div>
            </div>
            if let Some(msg) = (*last_result).clone() {
                <div style="text-align:center; font-weight:600;">{ msg }</div>
            }
        </div>
    }
}
