//! HTML rendering of the aggregated milestones through handlebars.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::AggregatedMilestone;

/// Name of the entry template.
pub const INDEX: &str = "index";

const TEMPLATE_SUFFIX: &str = ".html.hbs";
const BUILTIN_INDEX: &str = include_str!("../../templates/index.html.hbs");

/// Visual class for a label, as used by the page's stylesheet.
pub fn label_class(label: &str) -> &'static str {
    match label {
        "bug" => "danger",
        "enhancement" => "success",
        _ => "default",
    }
}

/// Human phrasing of the time left until `due`.
pub fn describe_due(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (due.date_naive() - now.date_naive()).num_days();
    match days {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        -1 => "overdue by 1 day".to_string(),
        d if d > 1 => format!("due in {} days", d),
        d => format!("overdue by {} days", -d),
    }
}

mod helpers {
    use chrono::{DateTime, Utc};
    use handlebars::{
        handlebars_helper, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
    };

    use super::{describe_due, label_class};

    // An empty separator splits into characters, without empty ends.
    handlebars_helper!(split: |s: str, sep: str| {
        if sep.is_empty() {
            s.chars().map(String::from).collect::<Vec<String>>()
        } else {
            s.split(sep).map(str::to_owned).collect::<Vec<String>>()
        }
    });
    handlebars_helper!(label_class_helper: |label: str| label_class(label));
    handlebars_helper!(due_in: |due: str| match due.parse::<DateTime<Utc>>() {
        Ok(due) => describe_due(due, Utc::now()),
        Err(_) => due.to_string(),
    });

    pub fn now(
        _: &Helper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        out.write(&Utc::now().to_rfc3339())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    dir: Option<PathBuf>,
}

impl Renderer {
    /// Render with the template compiled into the binary.
    pub fn builtin() -> Self {
        Self { dir: None }
    }

    /// Render with the `*.html.hbs` files in `dir`, read again on every
    /// render. `index.html.hbs` is the entry point; the others are available
    /// as partials by their stem.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn registry(&self) -> Result<Handlebars<'static>> {
        let mut hb = Handlebars::new();
        hb.register_helper("split", Box::new(helpers::split));
        hb.register_helper("labelClass", Box::new(helpers::label_class_helper));
        hb.register_helper("dueIn", Box::new(helpers::due_in));
        hb.register_helper("now", Box::new(helpers::now));

        match &self.dir {
            Some(dir) => register_dir(&mut hb, dir)?,
            None => hb.register_template_string(INDEX, BUILTIN_INDEX)?,
        }
        Ok(hb)
    }

    /// Render the page for `repo`. The template sees `repo` and `milestones`.
    pub fn render(&self, repo: &str, milestones: &[AggregatedMilestone]) -> Result<Vec<u8>> {
        let hb = self.registry()?;
        let page = hb.render(
            INDEX,
            &json!({
                "repo": repo,
                "milestones": milestones,
            }),
        )?;
        Ok(page.into_bytes())
    }
}

fn register_dir(hb: &mut Handlebars<'static>, dir: &Path) -> Result<()> {
    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(TEMPLATE_SUFFIX))
        else {
            continue;
        };
        let source = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        hb.register_template_string(name, source)?;
    }
    Ok(())
}
