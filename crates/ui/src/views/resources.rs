use dioxus::prelude::*;

use crate::context::AppContext;

#[component]
pub fn ResourcesView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let resources = catalog.resources().to_vec();

    rsx! {
        div { class: "page resources",
            h2 { "Intel Database" }
            section { class: "panel panel--warning",
                h3 { "The 2025 \"Worst Case\" Scenario" }
                p {
                    "Standard LeetCode patterns are no longer sufficient. To pass the 2025 loop, you must demonstrate competency in "
                    strong { "Low-Level Design (LLD)" }
                    " and "
                    strong { "Leadership Principles" }
                    ". Do not skip the \"Hidden Curriculum\"."
                }
            }
            section { class: "panel",
                h3 { "Critical Links" }
                if resources.is_empty() {
                    p { class: "muted", "No links yet." }
                }
                ul { class: "resource-list",
                    for resource in resources {
                        li { key: "{resource.url()}", class: "resource",
                            a {
                                href: "{resource.url()}",
                                target: "_blank",
                                rel: "noreferrer",
                                "{resource.title()}"
                            }
                            p { class: "muted", "{resource.description()}" }
                        }
                    }
                }
            }
        }
    }
}
