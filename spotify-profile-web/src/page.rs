use leptos::{IntoView, component, prelude::*};

use crate::{components::button_class, html};

#[derive(PartialEq)]
pub enum Page {
    Dashboard,
    TimeMachine,
    None,
}

#[component]
fn navigation(active_page: Page) -> impl IntoView {
    html! {
        <nav class="flex gap-4 items-center px-4 py-3 w-full border-b border-gray-800">
            <span class="text-lg font-semibold">"Spotify Profile"</span>
            <a
                href="/dashboard"
                class=if active_page == Page::Dashboard { "text-green-500" } else { "text-gray-400" }
            >
                "Dashboard"
            </a>
            <a
                href="/time-machine"
                class=if active_page == Page::TimeMachine {
                    "text-green-500"
                } else {
                    "text-gray-400"
                }
            >
                "Time Machine"
            </a>
            <button
                class="ml-auto text-gray-400"
                hx-post="/api/auth/logout"
                hx-swap="none"
            >
                "Log out"
            </button>
        </nav>
    }
}

#[component]
fn head() -> impl IntoView {
    html! {
        <head>
            <title>"Spotify Profile"</title>
            <meta
                name="viewport"
                content="width=device-width, initial-scale=1, maximum-scale=5 viewport-fit=cover"
            />
            <meta name="theme-color" content="#000" />
            <script src="https://unpkg.com/htmx.org@2.0.4"></script>
            <script src="https://cdn.tailwindcss.com"></script>
        </head>
    }
}

#[component]
pub fn page(children: Children, active_page: Page) -> impl IntoView {
    html! {
        <!DOCTYPE html>
        <html lang="en" class="h-full dark">
            <Head />

            <body class="flex flex-col text-gray-50 bg-black min-h-dvh" hx-boost="true">
                <Navigation active_page=active_page />
                <div class="overflow-auto h-full p-4">{children()}</div>
            </body>
        </html>
    }
}

/// Shell for the pre-login landing page: no navigation, no boost.
#[component]
pub fn unauthorized_page(children: Children) -> impl IntoView {
    html! {
        <!DOCTYPE html>
        <html lang="en" class="h-full dark">
            <Head />

            <body class="flex flex-col justify-center items-center text-gray-50 bg-black min-h-dvh">
                {children()}
            </body>
        </html>
    }
}

#[component]
pub fn connect_prompt() -> impl IntoView {
    html! {
        <div class="flex flex-col gap-4 items-center">
            <h1 class="text-2xl font-semibold">"Spotify Profile"</h1>
            <p class="text-gray-400">"See your profile, library and top artists over time."</p>
            <a class=button_class() href="/api/auth">
                "Connect with Spotify"
            </a>
        </div>
    }
}
