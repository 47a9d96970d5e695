use std::fmt;

use crate::foundation::error::{PlaygroundError, PlaygroundResult};

/// Title shown before any page is mounted.
pub const APP_TITLE: &str = "Canvas Playground";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Painter,
    MovingBox,
    ControllableBox,
    Transforming,
    RacingCar,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Painter,
        Route::MovingBox,
        Route::ControllableBox,
        Route::Transforming,
        Route::RacingCar,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Painter => "/painter",
            Route::MovingBox => "/moving-box",
            Route::ControllableBox => "/controllable-box",
            Route::Transforming => "/transforming",
            Route::RacingCar => "/racing-car",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Painter => "Painter",
            Route::MovingBox => "Moving Box",
            Route::ControllableBox => "Controllable Box",
            Route::Transforming => "Transforming",
            Route::RacingCar => "Racing Car",
        }
    }

    pub fn title(self) -> String {
        format!("{APP_TITLE} - {}", self.name())
    }

    /// Resolve a path such as `/painter`. A missing leading slash or a trailing slash is
    /// accepted, matching relative menu links.
    pub fn resolve(path: &str) -> PlaygroundResult<Self> {
        let trimmed = path.trim();
        let key = trimmed.trim_start_matches('/').trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|r| &r.path()[1..] == key)
            .ok_or_else(|| PlaygroundError::routing(format!("no page for path '{trimmed}'")))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One navigation menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub name: &'static str,
    pub route: Route,
}

/// Navigation menu entries in display order.
pub fn menu() -> Vec<MenuItem> {
    Route::ALL
        .into_iter()
        .map(|route| MenuItem {
            name: route.name(),
            route,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_resolves_from_its_path() {
        for r in Route::ALL {
            assert_eq!(Route::resolve(r.path()).unwrap(), r);
        }
    }

    #[test]
    fn resolve_accepts_relative_and_trailing_slash() {
        assert_eq!(Route::resolve("painter").unwrap(), Route::Painter);
        assert_eq!(Route::resolve("/racing-car/").unwrap(), Route::RacingCar);
    }

    #[test]
    fn unknown_paths_are_routing_errors() {
        for p in ["/", "", "/paint", "/painter/extra"] {
            assert!(matches!(
                Route::resolve(p),
                Err(PlaygroundError::Routing(_))
            ));
        }
    }

    #[test]
    fn titles_are_fixed_strings() {
        assert_eq!(Route::Painter.title(), "Canvas Playground - Painter");
        assert_eq!(
            Route::ControllableBox.title(),
            "Canvas Playground - Controllable Box"
        );
        assert_eq!(Route::RacingCar.title(), "Canvas Playground - Racing Car");
    }

    #[test]
    fn menu_lists_every_page_in_order() {
        let names: Vec<_> = menu().iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            [
                "Painter",
                "Moving Box",
                "Controllable Box",
                "Transforming",
                "Racing Car"
            ]
        );
    }
}
