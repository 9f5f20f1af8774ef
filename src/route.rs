use crate::descriptor::{ConfigDescriptor, Filter};

/// A named filter instance, ordered within its route.
#[derive(Debug)]
pub struct RouteFilter {
    pub name: String,
    pub filter: Box<dyn Filter>,
}

impl RouteFilter {
    pub fn new(name: impl Into<String>, filter: Box<dyn Filter>) -> Self {
        Self {
            name: name.into(),
            filter,
        }
    }
}

#[derive(Debug, Default)]
pub struct Route {
    pub descriptor: Option<ConfigDescriptor>,
    pub filters: Vec<RouteFilter>,
}
