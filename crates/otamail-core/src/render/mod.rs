//! PMS summaries rendered from reservation records.
//!
//! The default template is the platform script: the exact block a receptionist
//! pastes into the PMS, ending with the collection instruction for the
//! platform's workflow. The generic layouts ignore the platform workflow.

mod layouts;
mod scripts;

use std::fmt::{self, Write};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OtamailError;
use crate::models::config::RenderConfig;
use crate::models::reservation::Reservation;

/// Date stamp format used when the configured one cannot be rendered.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Summary layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Platform-specific script with its collection instruction.
    #[default]
    Platform,
    Standard,
    Compact,
    Detailed,
    PmsSimple,
}

/// Catalog entry for a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDescriptor {
    pub template: Template,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Template catalog in listing order.
pub static TEMPLATES: [TemplateDescriptor; 5] = [
    TemplateDescriptor {
        template: Template::Platform,
        id: "platform",
        name: "Script plateforme",
        description: "Procédure d'encaissement propre à chaque plateforme",
    },
    TemplateDescriptor {
        template: Template::Standard,
        id: "standard",
        name: "Standard",
        description: "Format classique pour PMS",
    },
    TemplateDescriptor {
        template: Template::Compact,
        id: "compact",
        name: "Compact",
        description: "Format condensé sur moins de lignes",
    },
    TemplateDescriptor {
        template: Template::Detailed,
        id: "detailed",
        name: "Détaillé",
        description: "Format complet avec toutes les informations",
    },
    TemplateDescriptor {
        template: Template::PmsSimple,
        id: "pms_simple",
        name: "PMS Simple",
        description: "Format simplifié pour saisie rapide",
    },
];

impl Template {
    pub fn descriptor(self) -> &'static TemplateDescriptor {
        TEMPLATES
            .iter()
            .find(|d| d.template == self)
            .unwrap_or(&TEMPLATES[0])
    }

    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up a template by id, case-insensitively.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        TEMPLATES
            .iter()
            .find(|d| d.id.eq_ignore_ascii_case(id))
            .map(|d| d.template)
    }

    /// Lenient lookup: unknown ids fall back to the platform script.
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            debug!("Unknown template '{}', using platform script", id);
            Template::Platform
        })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Template {
    type Err = OtamailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| OtamailError::UnknownTemplate(s.to_string()))
    }
}

/// `(id, name, description)` of every template.
pub fn list_templates() -> Vec<(&'static str, &'static str, &'static str)> {
    TEMPLATES
        .iter()
        .map(|d| (d.id, d.name, d.description))
        .collect()
}

/// Everything a template needs besides the record.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Person who processed the e-mail.
    pub operator: String,
    /// Day stamped on the summary.
    pub today: NaiveDate,
    /// chrono format of the stamp.
    pub date_format: String,
}

impl RenderContext {
    pub fn new(operator: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            operator: operator.into(),
            today,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Render date. An unusable format falls back to `dd/mm/yyyy`.
    pub fn stamp(&self) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.today.format(&self.date_format)).is_err() {
            debug!("Invalid date format '{}'", self.date_format);
            out = self.today.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }
}

/// Configurable summary renderer.
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
    template: Template,
    date_format: String,
}

impl SummaryRenderer {
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            template: config.default_template,
            date_format: config.date_format.clone(),
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn template(&self) -> Template {
        self.template
    }

    /// Render with today's local date.
    pub fn render(&self, record: &Reservation, operator: &str) -> String {
        self.render_on(record, operator, Local::now().date_naive())
    }

    /// Render with an explicit date stamp.
    pub fn render_on(&self, record: &Reservation, operator: &str, today: NaiveDate) -> String {
        let ctx = RenderContext {
            operator: operator.to_string(),
            today,
            date_format: self.date_format.clone(),
        };
        render_with(self.template, record, &ctx)
    }
}

impl Default for SummaryRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a record with a template and context.
pub fn render_with(template: Template, record: &Reservation, ctx: &RenderContext) -> String {
    debug!("Rendering {} summary with template {}", record.platform, template);
    match template {
        Template::Platform => scripts::render_script(record, ctx),
        Template::Standard => layouts::standard(record, ctx),
        Template::Compact => layouts::compact(record, ctx),
        Template::Detailed => layouts::detailed(record, ctx),
        Template::PmsSimple => layouts::pms_simple(record, ctx),
    }
}
