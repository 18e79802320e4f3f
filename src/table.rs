//! Route table compilation
//!
//! Transforms the ordered route list into the three read-only structures
//! matching runs against: a per-method map of exact paths, a per-method
//! ordered list of compiled patterns, and a path-to-methods index used only
//! for method-not-allowed detection. Pure function of its input; pattern
//! compilation errors surface here, not at registration.

use crate::error::RouterResult;
use crate::handler::Handler;
use crate::pattern::CompiledPattern;
use crate::route::Route;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// One entry in the per-method dynamic list.
#[derive(Debug)]
pub(crate) struct DynamicRoute {
    pub(crate) pattern: Arc<CompiledPattern>,
    pub(crate) handler: Arc<dyn Handler>,
}

/// Compiled, read-only route tables shared by the dispatcher and matcher.
#[derive(Default, Debug)]
pub(crate) struct RouteTables {
    /// method -> exact path -> handler; last registration wins.
    pub(crate) static_map: HashMap<String, HashMap<String, Arc<dyn Handler>>>,
    /// method -> patterns in registration order; first match wins.
    pub(crate) dynamic_list: HashMap<String, Vec<DynamicRoute>>,
    /// exact path -> methods with a static registration, kept sorted for
    /// the method-not-allowed error contract. Templated paths are not
    /// indexed: a path reachable only through patterns never produces
    /// method-not-allowed.
    pub(crate) static_path_methods: HashMap<String, BTreeSet<String>>,
}

impl RouteTables {
    pub(crate) fn static_path_count(&self) -> usize {
        self.static_path_methods.len()
    }

    pub(crate) fn dynamic_route_count(&self) -> usize {
        self.dynamic_list.values().map(Vec::len).sum()
    }
}

/// A template is dynamic as soon as it contains placeholder syntax.
fn is_dynamic(path: &str) -> bool {
    path.contains('{')
}

/// Build the compiled tables from the ordered route list.
pub(crate) fn build_tables(routes: &[Route]) -> RouterResult<RouteTables> {
    let mut tables = RouteTables::default();

    for route in routes {
        if is_dynamic(&route.path) {
            // Compiled once per route, shared across its methods.
            let pattern = Arc::new(CompiledPattern::compile(&route.path)?);
            for method in &route.methods {
                tables
                    .dynamic_list
                    .entry(method.clone())
                    .or_default()
                    .push(DynamicRoute {
                        pattern: Arc::clone(&pattern),
                        handler: Arc::clone(&route.handler),
                    });
            }
        } else {
            for method in &route.methods {
                tables
                    .static_map
                    .entry(method.clone())
                    .or_default()
                    .insert(route.path.clone(), Arc::clone(&route.handler));
                tables
                    .static_path_methods
                    .entry(route.path.clone())
                    .or_default()
                    .insert(method.clone());
            }
        }
    }

    Ok(tables)
}
