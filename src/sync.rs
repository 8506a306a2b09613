//! Best-effort remote sync.
//!
//! Every call is a single attempt. The `resolve_*` helpers turn the outcome
//! into actions to dispatch: the backend's snapshot on success, the local
//! equivalent on any failure, so play continues offline.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::minigame::{self, CoinSide, MinigamePlay};
use crate::reducer::GameAction;

/// Upper bound the backend accepts for one tap batch.
pub const MAX_TAPS_PER_REQUEST: u32 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TapRequest {
    telegram_id: i64,
    taps: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameRequest {
    telegram_id: i64,
    stake: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    choice: Option<CoinSide>,
}

/// Balances returned by `/game/{kind}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettlement {
    pub coins: u64,
    #[serde(default)]
    pub ton_coins: u64,
}

impl GameSettlement {
    pub fn snapshot(&self) -> Value {
        json!({ "coins": self.coins, "tonCoins": self.ton_coins })
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &GameConfig) -> Option<Self> {
        cfg.api_base_url.as_deref().map(Self::new)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /user/{id}`: the stored player snapshot.
    pub async fn fetch_user(&self, telegram_id: i64) -> Result<Value> {
        let resp = self
            .http
            .get(self.url(&format!("/user/{telegram_id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }

    /// `POST /tap`: applies a batch server-side and returns the new snapshot.
    pub async fn submit_taps(&self, telegram_id: i64, taps: u32) -> Result<Value> {
        self.post_json("/tap", &TapRequest { telegram_id, taps }).await
    }

    /// `POST /game/{kind}`: settles a stake server-side.
    pub async fn play_game(&self, telegram_id: i64, play: MinigamePlay) -> Result<GameSettlement> {
        let body = GameRequest { telegram_id, stake: play.stake(), choice: play.choice() };
        let value = self
            .post_json(&format!("/game/{}", play.kind().endpoint()), &body)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }
}

fn remote(client: Option<&ApiClient>, user_id: Option<i64>) -> Result<(&ApiClient, i64)> {
    match (client, user_id) {
        (Some(c), Some(id)) => Ok((c, id)),
        _ => Err(GameError::Offline),
    }
}

pub fn local_taps(taps: u32) -> Vec<GameAction> {
    (0..taps).map(|_| GameAction::Tap).collect()
}

pub fn local_minigame<R: Rng + ?Sized>(play: MinigamePlay, rng: &mut R) -> GameAction {
    GameAction::MinigameResult {
        game: play.kind(),
        stake: play.stake(),
        result: minigame::simulate(play, rng),
    }
}

pub async fn resolve_taps(client: Option<&ApiClient>, user_id: Option<i64>, taps: u32) -> Vec<GameAction> {
    if taps == 0 {
        return Vec::new();
    }
    if taps > MAX_TAPS_PER_REQUEST {
        return local_taps(taps);
    }
    let outcome = match remote(client, user_id) {
        Ok((c, id)) => c.submit_taps(id, taps).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(snapshot) => vec![GameAction::LoadGame { snapshot }],
        Err(err) => {
            tracing::debug!(error = %err, taps, "tap batch settled locally");
            local_taps(taps)
        }
    }
}

pub async fn resolve_minigame<R: Rng + ?Sized>(
    client: Option<&ApiClient>,
    user_id: Option<i64>,
    play: MinigamePlay,
    rng: &mut R,
) -> GameAction {
    let outcome = match remote(client, user_id) {
        Ok((c, id)) => c.play_game(id, play).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(settled) => GameAction::LoadGame { snapshot: settled.snapshot() },
        Err(err) => {
            tracing::debug!(error = %err, game = ?play.kind(), "minigame settled locally");
            local_minigame(play, rng)
        }
    }
}

/// Startup read; `None` means keep whatever is local.
pub async fn fetch_remote_snapshot(client: Option<&ApiClient>, user_id: Option<i64>) -> Option<GameAction> {
    let outcome = match remote(client, user_id) {
        Ok((c, id)) => c.fetch_user(id).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(snapshot) => Some(GameAction::LoadGame { snapshot }),
        Err(err) => {
            tracing::info!(error = %err, "backend unavailable, continuing offline");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigame::{MinigameKind, MinigamePayout};
    use futures::executor::block_on;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn taps_fall_back_to_local_without_identity() {
        let client = ApiClient::new("http://127.0.0.1:9/api/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api");
        let actions = block_on(resolve_taps(Some(&client), None, 3));
        assert_eq!(actions, vec![GameAction::Tap; 3]);
    }

    #[test]
    fn oversized_and_empty_batches_stay_local() {
        assert!(block_on(resolve_taps(None, Some(1), 0)).is_empty());
        assert_eq!(block_on(resolve_taps(None, Some(1), 25)).len(), 25);
    }

    #[test]
    fn offline_minigame_is_simulated() {
        let mut rng = StdRng::seed_from_u64(3);
        let play = MinigamePlay::Spin { stake: 100 };
        let action = block_on(resolve_minigame(None, Some(1), play, &mut rng));
        match action {
            GameAction::MinigameResult { game, stake, result } => {
                assert_eq!((game, stake), (MinigameKind::Spin, 100));
                assert!([0, 100, 150, 200, 500, 1000].contains(&result.coins));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn no_startup_snapshot_when_offline() {
        assert_eq!(block_on(fetch_remote_snapshot(None, Some(5))), None);
    }

    #[test]
    fn settlement_decodes_backend_payload() {
        let settled: GameSettlement = serde_json::from_value(json!({
            "success": true,
            "result": { "coins": 200, "won": true },
            "coins": 1200,
            "tonCoins": 0,
            "gameStats": { "spinsWon": 1 }
        }))
        .unwrap();
        assert_eq!(settled.snapshot(), json!({ "coins": 1200, "tonCoins": 0 }));
    }

    #[test]
    fn request_bodies_use_backend_field_names() {
        let body = serde_json::to_value(GameRequest { telegram_id: 9, stake: 500, choice: Some(CoinSide::Heads) }).unwrap();
        assert_eq!(body, json!({ "telegramId": 9, "stake": 500, "choice": "heads" }));
        let tap = serde_json::to_value(TapRequest { telegram_id: 9, taps: 4 }).unwrap();
        assert_eq!(tap, json!({ "telegramId": 9, "taps": 4 }));
    }

    #[test]
    fn local_minigame_carries_the_stake() {
        let mut rng = StdRng::seed_from_u64(11);
        let action = local_minigame(MinigamePlay::CoinFlip { stake: 500, guess: CoinSide::Heads }, &mut rng);
        let GameAction::MinigameResult { stake, result, .. } = action else {
            panic!("expected a minigame result");
        };
        assert_eq!(stake, 500);
        assert!(result == MinigamePayout::coins(1000) || result == MinigamePayout::default());
    }
}
