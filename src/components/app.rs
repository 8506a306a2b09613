use std::rc::Rc;
use wasm_bindgen::JsValue;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{
    boost_screen::BoostScreen, friends_screen::FriendsScreen, games_screen::GamesScreen,
    interval::Interval, nav_bar::NavBar, profile_screen::ProfileScreen, stats_panel::StatsPanel,
    tap_screen::TapScreen, tasks_screen::TasksScreen,
};
use crate::config::GameConfig;
use crate::model::{Identity, PlayerState};
use crate::persistence::{LocalStore, persist_if_ready, restore_action};
use crate::reducer::GameAction;
use crate::sync::{ApiClient, fetch_remote_snapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Tap,
    Games,
    Boosts,
    Tasks,
    Friends,
    Profile,
}

/// Services shared with the screens.
#[derive(Clone)]
pub struct SyncContext {
    pub api: Option<Rc<ApiClient>>,
    pub store: Rc<LocalStore>,
}

impl PartialEq for SyncContext {
    fn eq(&self, other: &Self) -> bool {
        let same_api = match (&self.api, &other.api) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_api && Rc::ptr_eq(&self.store, &other.store)
    }
}

fn js_field(obj: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Reads `Telegram.WebApp` if the page runs as a Mini App.
/// Returns the user (if exposed) and whether the WebApp object exists.
fn detect_telegram() -> (Option<Identity>, bool) {
    let Some(window) = web_sys::window() else {
        return (None, false);
    };
    let in_query = window
        .location()
        .search()
        .map(|q| q.contains("tgWebAppData"))
        .unwrap_or(false);
    let window: JsValue = window.into();
    let web_app = js_field(&window, "Telegram").and_then(|tg| js_field(&tg, "WebApp"));
    let available = web_app.is_some() || in_query;
    let user = web_app
        .as_ref()
        .and_then(|app| js_field(app, "initDataUnsafe"))
        .and_then(|data| js_field(&data, "user"))
        .map(|user| {
            let text = |key: &str| js_field(&user, key).and_then(|v| v.as_string());
            Identity {
                user_id: js_field(&user, "id").and_then(|v| v.as_f64()).map(|id| id as i64),
                username: text("username"),
                first_name: text("first_name"),
                last_name: text("last_name"),
            }
        });
    (user, available)
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| GameConfig::from_build_env());
    let store = {
        let key = config.storage_key.clone();
        use_memo(key, |key| LocalStore::new(key.clone()))
    };
    let api = {
        let config = config.clone();
        use_memo((), move |_| ApiClient::from_config(&config).map(Rc::new))
    };
    let game = use_reducer(PlayerState::new);
    let latest = use_mut_ref(|| game.clone());
    let tab = use_state(|| Tab::Tap);

    // Startup: persisted snapshot, identity, backend snapshot, then initialized
    {
        let game = game.clone();
        let store = store.clone();
        let api = api.clone();
        let remote = config.remote_enabled();
        use_effect_with((), move |_| {
            tracing::debug!(remote, "starting game session");
            if let Some(action) = restore_action(&*store) {
                tracing::info!("restoring saved game");
                game.dispatch(action);
            }
            let (tg_user, telegram_available) = detect_telegram();
            if !telegram_available {
                tracing::info!("running in web mode with the demo user");
                game.dispatch(GameAction::InitIdentity { identity: Identity::demo() });
                game.dispatch(GameAction::Initialize { is_initialized: true, telegram_available: false });
            } else {
                let user_id = tg_user.as_ref().and_then(|u| u.user_id);
                if let Some(identity) = tg_user {
                    game.dispatch(GameAction::InitIdentity { identity });
                }
                spawn_local(async move {
                    if let Some(action) = fetch_remote_snapshot((*api).as_deref(), user_id).await {
                        game.dispatch(action);
                    }
                    game.dispatch(GameAction::Initialize { is_initialized: true, telegram_available: true });
                });
            }
            || ()
        });
    }

    // Keep the latest handle for timer callbacks; persist every change
    {
        let latest = latest.clone();
        let store = store.clone();
        use_effect_with(game.clone(), move |game| {
            *latest.borrow_mut() = game.clone();
            persist_if_ready(&*store, game);
            || ()
        });
    }

    // Level-up watcher
    {
        let game = game.clone();
        let deps = (game.experience, game.experience_to_next, game.is_initialized);
        use_effect_with(deps, move |_| {
            if game.level_up_due() {
                game.dispatch(GameAction::LevelUp);
            }
            || ()
        });
    }

    // Energy regeneration + boost expiry sweep, only while initialized
    {
        let latest = latest.clone();
        let config = config.clone();
        use_effect_with(game.is_initialized, move |initialized| {
            let mut timers: Vec<Interval> = Vec::new();
            if *initialized {
                let regen = {
                    let latest = latest.clone();
                    Interval::start(config.energy_regen_interval_ms, move || {
                        let handle = latest.borrow().clone();
                        if handle.needs_energy() {
                            handle.dispatch(GameAction::RestoreEnergy);
                        }
                    })
                };
                let sweep = {
                    let latest = latest.clone();
                    Interval::start(config.boost_sweep_interval_ms, move || {
                        let handle = latest.borrow().clone();
                        if handle.is_initialized {
                            handle.dispatch(GameAction::SweepExpiredBoosts);
                        }
                    })
                };
                timers.extend(regen);
                timers.extend(sweep);
            }
            move || drop(timers)
        });
    }

    let on_select = {
        let tab = tab.clone();
        Callback::from(move |t: Tab| tab.set(t))
    };

    let ctx = SyncContext { api: (*api).clone(), store: store.clone() };

    let content = match *tab {
        Tab::Tap => html! { <TapScreen game={game.clone()} on_navigate={on_select.clone()} /> },
        Tab::Games => html! { <GamesScreen game={game.clone()} /> },
        Tab::Boosts => html! { <BoostScreen game={game.clone()} /> },
        Tab::Tasks => html! { <TasksScreen game={game.clone()} /> },
        Tab::Friends => html! { <FriendsScreen game={game.clone()} /> },
        Tab::Profile => html! { <ProfileScreen game={game.clone()} /> },
    };

    html! {
        <ContextProvider<SyncContext> context={ctx}>
            <div style="position:relative; min-height:100vh; background:#0e1116; color:#e6edf3; font-family:system-ui, sans-serif; padding-bottom:72px;">
                <StatsPanel coins={game.coins} ton_coins={game.ton_coins} level={game.level} />
                { content }
                <NavBar active={*tab} on_select={on_select} />
            </div>
        </ContextProvider<SyncContext>>
    }
}
