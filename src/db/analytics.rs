// src/db/analytics.rs
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::domain::report::Severity;
use crate::errors::ServerError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopBuilding {
    pub id: i64,
    pub address: Option<String>,
    pub reports_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayCount {
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub count: i64,
}

/// Buildings with the most reports, ties broken by id.
pub fn top_buildings(conn: &Connection, limit: i64) -> Result<Vec<TopBuilding>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select b.id, b.address, count(r.id) as reports_count
            from buildings b
            left join reports r on r.building_id = b.id
            group by b.id, b.address
            order by reports_count desc, b.id
            limit ?
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit], |row| {
            Ok(TopBuilding {
                id: row.get(0)?,
                address: row.get(1)?,
                reports_count: row.get(2)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn severity_stats(conn: &Connection) -> Result<Vec<SeverityCount>, ServerError> {
    let mut stmt = conn
        .prepare("select severity, count(*) from reports group by severity order by severity")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(SeverityCount {
                severity: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Reports created at or after `since`, bucketed by UTC date.
pub fn reports_by_day(conn: &Connection, since: i64) -> Result<Vec<DayCount>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select date(created_at, 'unixepoch') as day, count(*)
            from reports
            where created_at >= ?
            group by day
            order by day
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![since], |row| {
            Ok(DayCount {
                date: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
