use super::app::Tab;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NavBarProps {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

const TABS: [(Tab, &str, &str); 6] = [
    (Tab::Tap, "👆", "Tap"),
    (Tab::Games, "🎮", "Games"),
    (Tab::Boosts, "⚡", "Boosts"),
    (Tab::Tasks, "✅", "Tasks"),
    (Tab::Friends, "👥", "Friends"),
    (Tab::Profile, "👤", "Profile"),
];

#[function_component]
pub fn NavBar(props: &NavBarProps) -> Html {
    html! {
        <nav style="position:fixed; bottom:0; left:0; right:0; display:flex; background:#161b22; border-top:1px solid #30363d;">
            { for TABS.iter().map(|&(tab, icon, label)| {
                let cb = props.on_select.clone();
                let onclick = Callback::from(move |_| cb.emit(tab));
                let color = if tab == props.active { "#d4af37" } else { "#8b949e" };
                html! {
                    <button {onclick} style={format!("flex:1; padding:8px 0; background:none; border:none; color:{}; display:flex; flex-direction:column; align-items:center; gap:2px; font-size:11px;", color)}>
                        <span style="font-size:18px;">{ icon }</span>
                        <span>{ label }</span>
                    </button>
                }
            }) }
        </nav>
    }
}
