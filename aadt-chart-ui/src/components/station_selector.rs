//! Dropdown selector for choosing a count station.

use crate::state::AppState;
use dioxus::prelude::*;

/// Station dropdown selector.
/// Reads available stations from AppState and updates selected_station on change.
/// Selecting a station plays the role of clicking its marker on the map.
#[component]
pub fn StationSelector() -> Element {
    let mut state = use_context::<AppState>();
    let stations = state.stations.read().clone();
    let selected = (state.selected_station)();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_station.set(value);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Count Station: "
            }
            select {
                id: "station-select",
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_empty(),
                    "Select a station"
                }
                for station in stations.iter() {
                    option {
                        value: "{station.id}",
                        selected: station.id == selected,
                        "{station.title()} ({station.id})"
                    }
                }
            }
        }
    }
}
