use crate::{config::EnvConfig, template_engine};
use anyhow::{Context, Result};
use axum::response::IntoResponse;
use axum_template::{RenderHtml, engine::Engine};
use libmapping::Database;
use std::{path::PathBuf, sync::Arc};
use tracing::trace;

pub(crate) type TemplateEngine = Engine<minijinja::Environment<'static>>;

#[derive(Debug)]
pub struct SharedState {
    pub db: Database,
    pub tmpl: TemplateEngine,
    pub config: EnvConfig,
    pub datadir: PathBuf,
}

impl SharedState {
    pub async fn new(envname: &str, env: EnvConfig, datadir: PathBuf) -> Result<Self> {
        trace!("Creating shared app state");
        let template = template_engine(envname, datadir.join("templates"));
        Ok(Self {
            db: Database::open(&env.database)
                .await
                .with_context(|| format!("Unable to open database {}", &env.database))?,
            tmpl: template,
            config: env,
            datadir,
        })
    }

    /// Render the template named `key` with the given template context
    pub fn render_template<K: AsRef<str>>(
        &self,
        key: K,
        context: minijinja::Value,
    ) -> impl IntoResponse + use<K> {
        RenderHtml(key, self.tmpl.clone(), context)
    }

    #[cfg(test)]
    pub fn test(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        let template = template_engine("test", "./templates");
        tracing::debug!("Creating test shared app state");
        Self {
            db: Database::from(pool),
            tmpl: template,
            config: EnvConfig {
                listen: crate::config::ListenConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8080,
                },
                database: "test-database.sqlite".to_string(),
                public_base_url: None,
            },
            datadir: ".".into(),
        }
    }
}

pub type AppState = Arc<SharedState>;
