use crate::util::format_amount;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub coins: u64,
    pub ton_coins: u64,
    pub level: u32,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:6px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let value_style = "font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:sticky; top:0; z-index:10; display:flex; justify-content:space-between; background:rgba(22,27,34,0.95); border-bottom:1px solid #30363d; padding:10px 14px; font-size:14px;">
            <div style={row_style}>
                <span style={icon_style}>{"🪙"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ format_amount(props.coins) }</span>
            </div>
            <div style={row_style}>
                <span style={icon_style}>{"💎"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format_amount(props.ton_coins) }</span>
            </div>
            <div style={row_style}>
                <span style={icon_style}>{"⭐"}</span>
                <span style={format!("{} color:#a371f7;", value_style)}>{ format!("Lv {}", props.level) }</span>
            </div>
        </div>
    }
}
