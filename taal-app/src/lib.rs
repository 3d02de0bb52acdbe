pub mod config;
pub mod modules;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use taal_axum::WebServer;
use taal_core::i18n::loader;
use taal_core::{Localizer, ResourceSet};

use crate::config::{Config, I18nConfig};
use crate::routes::AppState;

/// Aggregate the built-in tables plus configured overrides into a localizer.
pub fn build_localizer(i18n: &I18nConfig) -> Result<Localizer> {
    let mut tables = modules::app::translations();
    for o in &i18n.overrides {
        let table = loader::load_dir(&o.dir, &o.namespace)
            .with_context(|| format!("failed to load {} overrides", o.namespace))?;
        tables.push(table);
    }

    Ok(Localizer::new(ResourceSet::aggregate(tables), i18n.options()))
}

pub fn build_server(config: &Config, localizer: Arc<Localizer>) -> WebServer {
    let state = AppState::new(localizer.clone(), modules::app::page());

    WebServer::new(config.server.addr.clone())
        .mount(routes::router(state))
        .layer_fn(routes::log_requests)
        .layer_i18n(localizer, config.i18n.negotiate_accept_language)
}
