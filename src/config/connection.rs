//! Storage-engine connection strings built from templates.
//!
//! A template carries one or more `%s` placeholders that receive the canonical
//! path of the database file inside the data directory. Use `%%` for a
//! literal `%`.

use super::settings::Settings;
use super::store::masked;
use super::ConfigError;

/// Connection prefix of the embedded file-backed H2 engine.
pub const H2_FILE_PREFIX: &str = "jdbc:h2:file:";
/// Native H2 storage suffix. H2 names a database by stem, so it is dropped.
pub const H2_FILE_SUFFIX: &str = ".h2.db";

impl Settings {
    /// Builds the connection string configured under `template_key`.
    ///
    /// A template without a placeholder is returned as is; otherwise the data
    /// directory is materialized and `file_name_key` must name the file.
    pub fn connection_string(
        &self,
        template_key: &str,
        file_name_key: Option<&str>,
    ) -> Result<String, ConfigError> {
        let template = self.get_string(template_key).ok_or_else(|| {
            ConfigError::invalid(template_key, "missing connection string template")
        })?;
        if !template.contains("%s") {
            return Ok(template);
        }

        let directory = self.data_directory()?;
        let file_name = file_name_key
            .and_then(|key| self.get_string(key))
            .ok_or_else(|| {
                ConfigError::invalid(
                    file_name_key.unwrap_or(template_key),
                    "a file name must be defined to build a file based connection string",
                )
            })?;

        let file_name = engine_file_stem(&template, &file_name);
        let canonical = dunce::canonicalize(&directory).map_err(|source| ConfigError::Io {
            path: directory.clone(),
            source,
        })?;
        let db_path = canonical.join(file_name);
        let connection = render(&template, &db_path.to_string_lossy());

        tracing::debug!("Connection String: '{}'", masked(template_key, &connection));
        Ok(connection)
    }
}

fn engine_file_stem<'a>(template: &str, file_name: &'a str) -> &'a str {
    if template.starts_with(H2_FILE_PREFIX) {
        file_name.strip_suffix(H2_FILE_SUFFIX).unwrap_or(file_name)
    } else {
        file_name
    }
}

/// Substitutes every `%s` with `value` and unescapes `%%`.
fn render(template: &str, value: &str) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                result.push('%');
            }
            Some('s') => {
                chars.next();
                result.push_str(value);
            }
            _ => result.push('%'),
        }
    }

    result
}
