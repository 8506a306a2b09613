use yew::prelude::*;

use crate::model::{PlayerState, SOCIAL_CHANNEL_URL, Task, TaskKind};
use crate::reducer::GameAction;
use crate::util::format_amount;

#[derive(Properties, PartialEq, Clone)]
pub struct TasksScreenProps {
    pub game: UseReducerHandle<PlayerState>,
}

fn open_channel() {
    let Some(window) = web_sys::window() else { return };
    if let Err(err) = window.open_with_url_and_target(SOCIAL_CHANNEL_URL, "_blank") {
        tracing::warn!(error = ?err, "could not open channel link");
    }
}

fn section_title(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Daily => "Daily",
        TaskKind::Social => "Social",
        TaskKind::Achievement => "Achievements",
    }
}

fn task_row(task: &Task, game: &UseReducerHandle<PlayerState>) -> Html {
    let progress = match (task.progress, task.requirement) {
        (Some(p), Some(r)) => html! {
            <span style="font-size:12px; opacity:0.7;">{ format!("{} / {}", format_amount(p), format_amount(r)) }</span>
        },
        _ => html! {},
    };

    let action = if task.completed {
        html! { <span style="color:#3fb950; font-weight:600;">{"Done"}</span> }
    } else if task.is_claimable() {
        let onclick = {
            let game = game.clone();
            let id = task.id.clone();
            let social = task.kind == TaskKind::Social;
            Callback::from(move |_| {
                if social {
                    open_channel();
                }
                game.dispatch(GameAction::CompleteTask { task_id: id.clone() });
            })
        };
        let label = if task.kind == TaskKind::Social { "Go" } else { "Claim" };
        html! { <button {onclick} style="min-width:70px;">{ label }</button> }
    } else {
        html! { <button disabled={true} style="min-width:70px;">{"Claim"}</button> }
    };

    html! {
        <div key={task.id.clone()} style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; justify-content:space-between; align-items:center; gap:10px;">
            <div style="display:flex; flex-direction:column; gap:4px;">
                <strong>{ task.title.clone() }</strong>
                <span style="font-size:12px; opacity:0.8;">{ task.description.clone() }</span>
                <span style="font-size:12px; color:#d4af37;">{ format!("+{} coins", format_amount(task.reward)) }</span>
                { progress }
            </div>
            { action }
        </div>
    }
}

#[function_component(TasksScreen)]
pub fn tasks_screen(props: &TasksScreenProps) -> Html {
    let game = &props.game;
    let sections = [TaskKind::Daily, TaskKind::Social, TaskKind::Achievement];

    html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:12px;">
            <h2 style="margin:0;">{"Tasks"}</h2>
            { for sections.iter().map(|&kind| {
                let rows: Vec<&Task> = game.tasks.iter().filter(|t| t.kind == kind).collect();
                if rows.is_empty() {
                    return html! {};
                }
                html! {
                    <>
                        <h3 style="margin:8px 0 0; font-size:14px; opacity:0.8;">{ section_title(kind) }</h3>
                        { for rows.into_iter().map(|t| task_row(t, game)) }
                    </>
                }
            }) }
        </div>
    }
}
