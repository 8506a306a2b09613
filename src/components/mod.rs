pub mod app;
pub mod boost_screen;
pub mod friends_screen;
pub mod games_screen;
pub mod interval;
pub mod nav_bar;
pub mod profile_screen;
pub mod stats_panel;
pub mod tap_screen;
pub mod tasks_screen;
