//! Route table: declared records, flattened for first-match resolution.

use std::collections::HashMap;

use super::guard::EntityGuard;
use super::location::{split_url, Location, MatchedView, NavigationTarget, Params, Query};
use super::name::{RouteName, View};
use super::pattern::{join_paths, PathPattern};
use super::props::{PropsFn, RouteMatch, ViewProps};
use crate::error::RouteError;

/// What a route record points at.
#[derive(Debug, Clone, Copy)]
pub struct Destination {
    pub name: RouteName,
    pub view: View,
    pub props: Option<PropsFn>,
    pub guard: Option<EntityGuard>,
}

impl Destination {
    pub fn derive_props(&self, route: &RouteMatch<'_>) -> ViewProps {
        self.props.map_or(ViewProps::None, |derive| derive(route))
    }
}

/// A declared route, possibly with nested children.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    destination: Destination,
    path: String,
    children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(name: RouteName, path: impl Into<String>, view: View) -> Self {
        Self {
            destination: Destination {
                name,
                view,
                props: None,
                guard: None,
            },
            path: path.into(),
            children: Vec::new(),
        }
    }

    pub fn props(mut self, derive: PropsFn) -> Self {
        self.destination.props = Some(derive);
        self
    }

    pub fn guard(mut self, guard: EntityGuard) -> Self {
        self.destination.guard = Some(guard);
        self
    }

    pub fn children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

/// A leaf route with its full path and the destinations matched to reach it.
#[derive(Debug)]
struct FlatRoute {
    pattern: PathPattern,
    chain: Vec<Destination>,
}

/// Resolves paths to destinations in declaration order; first match wins.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<FlatRoute>,
    patterns: HashMap<RouteName, PathPattern>,
    destinations: HashMap<RouteName, Destination>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate names and a catch-all that is not
    /// declared last.
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, RouteError> {
        let mut table = Self {
            routes: Vec::new(),
            patterns: HashMap::new(),
            destinations: HashMap::new(),
        };

        for record in &records {
            if !record.path.starts_with('/') {
                return Err(RouteError::InvalidPattern {
                    pattern: record.path.clone(),
                    reason: "top-level routes must start with '/'".to_string(),
                });
            }
            table.flatten(record, "", &[])?;
        }

        let last = table.routes.len().saturating_sub(1);
        for (i, route) in table.routes.iter().enumerate() {
            if route.pattern.is_catch_all() && i != last {
                let name = route.chain.last().map_or(RouteName::NotFound, |d| d.name);
                return Err(RouteError::CatchAllNotLast(name));
            }
        }

        Ok(table)
    }

    fn flatten(
        &mut self,
        record: &RouteRecord,
        parent_path: &str,
        parent_chain: &[Destination],
    ) -> Result<(), RouteError> {
        let name = record.destination.name;
        if self.destinations.contains_key(&name) {
            return Err(RouteError::DuplicateName(name));
        }

        let full_path = join_paths(parent_path, &record.path);
        let pattern = PathPattern::parse(&full_path)?;
        if let Some(guard) = record.destination.guard {
            if !pattern.param_names().any(|p| p == guard.param) {
                return Err(RouteError::GuardParamMissing {
                    name,
                    pattern: pattern.as_str().to_string(),
                    param: guard.param,
                });
            }
        }
        self.destinations.insert(name, record.destination);
        self.patterns.insert(name, pattern.clone());

        let mut chain = parent_chain.to_vec();
        chain.push(record.destination);

        if record.children.is_empty() {
            self.routes.push(FlatRoute { pattern, chain });
        } else {
            for child in &record.children {
                self.flatten(child, &full_path, &chain)?;
            }
        }
        Ok(())
    }

    /// Number of resolvable (leaf) routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn destination(&self, name: RouteName) -> Option<&Destination> {
        self.destinations.get(&name)
    }

    /// Resolve a URL (path plus optional query) to a location.
    pub fn resolve(&self, url: &str) -> Result<Location, RouteError> {
        let (path, raw_query) = split_url(url);
        self.resolve_parts(path, Query::parse(raw_query))
    }

    pub fn resolve_target(&self, target: &NavigationTarget) -> Result<Location, RouteError> {
        match target {
            NavigationTarget::Path(url) => self.resolve(url),
            NavigationTarget::Named {
                name,
                params,
                query,
            } => {
                let path = self.href(*name, params)?;
                self.resolve_parts(&path, query.clone())
            }
        }
    }

    /// Build the path of a named destination.
    pub fn href(&self, name: RouteName, params: &Params) -> Result<String, RouteError> {
        let pattern = self
            .patterns
            .get(&name)
            .ok_or(RouteError::UnknownName(name))?;
        pattern.build(name, params)
    }

    fn resolve_parts(&self, path: &str, query: Query) -> Result<Location, RouteError> {
        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };

            let route_match = RouteMatch {
                params: &params,
                query: &query,
            };
            let matched: Vec<MatchedView> = route
                .chain
                .iter()
                .map(|d| MatchedView {
                    name: d.name,
                    view: d.view,
                    props: d.derive_props(&route_match),
                })
                .collect();

            let Some(leaf) = matched.last().map(|m| m.name) else {
                continue;
            };
            let path = if path.is_empty() { "/" } else { path };
            return Ok(Location {
                name: leaf,
                path: path.to_string(),
                params,
                query,
                matched,
            });
        }
        Err(RouteError::NoMatch(path.to_string()))
    }
}
