//! MySQL storage implementation.
//!
//! Tables are created on demand with `VARCHAR` columns named after the
//! site's own headings. Each table is filled inside its own transaction.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::error::{AppError, Result};
use crate::models::CompetitionHistory;
use crate::storage::{
    HistoryStorage, PODIUM_COLUMNS, PodiumRow, RESULTS_COLUMNS, ResultRow, STANDINGS_COLUMNS,
    WriteSummary, podium_table, results_table, standings_table,
};

const VALUE_WIDTH: u32 = 64;
const EMBLEM_WIDTH: u32 = 255;

/// MySQL-backed history store.
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    /// Connect to the database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Connect using the URL found in the environment variable `var`.
    pub async fn from_env(var: &str) -> Result<Self> {
        let url = std::env::var(var)
            .map_err(|_| AppError::config(format!("environment variable {var} is not set")))?;
        Self::connect(&url).await
    }

    /// Create `table` if missing and insert `rows` in one transaction.
    async fn write_table<'r, R>(&self, table: &str, columns: &[&str], rows: R) -> Result<usize>
    where
        R: IntoIterator<Item = Vec<&'r str>>,
    {
        sqlx::query(&create_table_sql(table, columns))
            .execute(&self.pool)
            .await?;

        let insert = insert_sql(table, columns);
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let mut query = sqlx::query(&insert);
            for value in row {
                query = query.bind(value);
            }
            query.execute(&mut *tx).await?;
            inserted += 1;
        }
        tx.commit().await?;

        log::debug!("Inserted {inserted} rows into `{table}`");
        Ok(inserted)
    }
}

/// Quote an identifier for MySQL.
fn quote(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

fn column_width(column: &str) -> u32 {
    if column.starts_with("эмблема") {
        EMBLEM_WIDTH
    } else {
        VALUE_WIDTH
    }
}

fn create_table_sql(table: &str, columns: &[&str]) -> String {
    let definitions: Vec<String> = std::iter::once("id INT AUTO_INCREMENT PRIMARY KEY".to_string())
        .chain(
            columns
                .iter()
                .map(|c| format!("{} VARCHAR({})", quote(c), column_width(c))),
        )
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(table),
        definitions.join(", ")
    )
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote(c)).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(table),
        names.join(", "),
        placeholders
    )
}

#[async_trait]
impl HistoryStorage for MySqlStorage {
    async fn write_history(&self, history: &CompetitionHistory) -> Result<WriteSummary> {
        let name = &history.competition.display_name;
        let mut tables = 0;
        let mut rows = 0;

        if !history.podiums.is_empty() {
            let podium: Vec<PodiumRow> = history
                .podiums
                .iter()
                .map(|(season, podium)| PodiumRow::new(season, podium))
                .collect();
            rows += self
                .write_table(
                    &podium_table(name),
                    &PODIUM_COLUMNS,
                    podium.iter().map(PodiumRow::values),
                )
                .await?;
            tables += 1;
        }

        for (season, standings) in &history.standings {
            rows += self
                .write_table(
                    &standings_table(name, season),
                    &STANDINGS_COLUMNS,
                    standings.iter().map(|s| s.fields().to_vec()),
                )
                .await?;
            tables += 1;
        }

        for (season, tours) in &history.results {
            let results = ResultRow::from_tours(tours);
            rows += self
                .write_table(
                    &results_table(name, season),
                    &RESULTS_COLUMNS,
                    results.iter().map(|r| r.values().to_vec()),
                )
                .await?;
            tables += 1;
        }

        log::info!("Wrote {tables} tables ({rows} rows) for {name}");

        Ok(WriteSummary {
            competition: name.clone(),
            location: "mysql".to_string(),
            tables_written: tables,
            rows_written: rows,
            timestamp: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "mysql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql("чемпионат мира 2018_результаты_туров", &RESULTS_COLUMNS);
        assert!(sql.starts_with(
            "CREATE TABLE IF NOT EXISTS `чемпионат мира 2018_результаты_туров` (id INT AUTO_INCREMENT PRIMARY KEY, `тур` VARCHAR(64)"
        ));
        assert!(sql.contains("`эмблема_первой_команды` VARCHAR(255)"));
    }

    #[test]
    fn test_insert_sql_placeholders() {
        let sql = insert_sql("x", &STANDINGS_COLUMNS);
        assert_eq!(sql.matches('?').count(), STANDINGS_COLUMNS.len());
    }

    #[test]
    fn test_quote_escapes_backticks() {
        assert_eq!(quote("a`b"), "`a``b`");
    }
}
