use dioxus::prelude::*;

mod components;

use components::LiveView;

const LIVE_CSS: Asset = asset!("/assets/styling/live.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#a38449" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Title { "RustyLive" }

        document::Stylesheet { href: LIVE_CSS }

        LiveView {}
    }
}
