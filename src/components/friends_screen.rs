use yew::prelude::*;

use crate::model::{PlayerState, REFERRAL_BONUS};
use crate::util::format_amount;

#[derive(Properties, PartialEq, Clone)]
pub struct FriendsScreenProps {
    pub game: UseReducerHandle<PlayerState>,
}

const SHARE_TEXT: &str = "Join me in Keze and earn coins by tapping!";

fn share_url(link: &str) -> String {
    format!(
        "https://t.me/share/url?url={}&text={}",
        js_sys::encode_uri_component(link),
        js_sys::encode_uri_component(SHARE_TEXT)
    )
}

#[function_component(FriendsScreen)]
pub fn friends_screen(props: &FriendsScreenProps) -> Html {
    let game = &props.game;
    let link = game.referral_link();

    let on_share = {
        let url = share_url(&link);
        Callback::from(move |_: MouseEvent| {
            let Some(window) = web_sys::window() else { return };
            if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
                tracing::warn!(error = ?err, "could not open share dialog");
            }
        })
    };

    let earned: u64 = game.referrals.iter().map(|r| r.earnings).sum();

    html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:12px;">
            <h2 style="margin:0;">{"Friends"}</h2>
            <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; flex-direction:column; gap:6px;">
                <span style="font-size:12px; opacity:0.8;">{ format!("Invite a friend and both get {} coins", format_amount(REFERRAL_BONUS)) }</span>
                <div>{"Your code: "}<strong style="letter-spacing:2px;">{ game.referral_code.clone() }</strong></div>
                <code style="font-size:11px; word-break:break-all; opacity:0.8;">{ link.clone() }</code>
                <button onclick={on_share}>{"📤 Share invite"}</button>
            </div>
            <div style="display:flex; gap:10px;">
                <div style="flex:1; text-align:center; background:#161b22; border-radius:10px; padding:10px;">
                    <div style="font-size:20px; font-weight:700;">{ game.referrals.len().to_string() }</div>
                    <div style="font-size:12px; opacity:0.7;">{"Friends"}</div>
                </div>
                <div style="flex:1; text-align:center; background:#161b22; border-radius:10px; padding:10px;">
                    <div style="font-size:20px; font-weight:700; color:#d4af37;">{ format_amount(earned) }</div>
                    <div style="font-size:12px; opacity:0.7;">{"Earned"}</div>
                </div>
            </div>
            if game.referrals.is_empty() {
                <div style="text-align:center; opacity:0.6; padding:20px 0;">{"No friends yet"}</div>
            } else {
                { for game.referrals.iter().map(|r| html! {
                    <div key={r.id.clone()} style="display:flex; justify-content:space-between; padding:8px 0; border-bottom:1px solid #30363d;">
                        <div style="display:flex; flex-direction:column;">
                            <span>{ r.username.clone() }</span>
                            <span style="font-size:11px; opacity:0.6;">{ r.joined_at.format("%Y-%m-%d").to_string() }</span>
                        </div>
                        <span style="color:#d4af37;">{ format!("+{}", format_amount(r.earnings)) }</span>
                    </div>
                }) }
            }
        </div>
    }
}
