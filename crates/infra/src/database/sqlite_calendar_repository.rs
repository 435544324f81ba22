//! SQLite-backed implementation of the `CalendarEventRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection, Params, Row};
use slotwise_core::ports::CalendarEventRepository;
use slotwise_domain::{
    CalendarEvent, EventId, EventKind, NewCalendarEvent, Result as DomainResult, SlotwiseError,
};
use tokio::task;
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};
use super::normalize_times;
use crate::errors::map_join_error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_EVENTS: &str = "SELECT id, owner, title, kind, date, start_time, end_time,
        location, category, subject, professor, color, created_at
 FROM calendar_events";

/// SQLite implementation of `CalendarEventRepository`
pub struct SqliteCalendarEventRepository {
    db: Arc<DbManager>,
}

impl SqliteCalendarEventRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalendarEventRepository for SqliteCalendarEventRepository {
    #[instrument(skip(self), fields(owner = %owner, date = %date))]
    async fn events_on(&self, owner: &str, date: NaiveDate) -> DomainResult<Vec<CalendarEvent>> {
        let db = Arc::clone(&self.db);
        let owner = owner.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<CalendarEvent>> {
            let conn = db.get_connection()?;
            let sql = format!(
                "{SELECT_EVENTS} WHERE owner = ?1 AND date = ?2 ORDER BY start_time, end_time"
            );
            query_events(&conn, &sql, params![owner, date.format(DATE_FORMAT).to_string()])
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self), fields(owner = %owner, from = %from, to = %to))]
    async fn events_between(
        &self,
        owner: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<CalendarEvent>> {
        let db = Arc::clone(&self.db);
        let owner = owner.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<CalendarEvent>> {
            let conn = db.get_connection()?;
            let sql = format!(
                "{SELECT_EVENTS} WHERE owner = ?1 AND date >= ?2 AND date <= ?3 \
                 ORDER BY date, start_time, end_time"
            );
            let from = from.format(DATE_FORMAT).to_string();
            let to = to.format(DATE_FORMAT).to_string();
            query_events(&conn, &sql, params![owner, from, to])
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, event), fields(owner = %event.owner, date = %event.date))]
    async fn create_event(&self, event: NewCalendarEvent) -> DomainResult<EventId> {
        let event = normalize_times(event)?;
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<EventId> {
            let conn = db.get_connection()?;
            let id = EventId::generate();
            let created_at = Utc::now().naive_utc();

            conn.execute(
                "INSERT INTO calendar_events (
                    id, owner, title, kind, date, start_time, end_time,
                    location, category, subject, professor, color, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    id.as_str(),
                    event.owner,
                    event.title,
                    event.kind.to_string(),
                    event.date.format(DATE_FORMAT).to_string(),
                    event.start_time,
                    event.end_time,
                    event.location,
                    event.category,
                    event.subject,
                    event.professor,
                    event.color,
                    created_at.format(TIMESTAMP_FORMAT).to_string(),
                ],
            )
            .map_err(map_sql_error)?;

            debug!(event_id = %id, "calendar event inserted");
            Ok(id)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Column values as stored, before domain parsing.
struct EventRow {
    id: String,
    owner: String,
    title: String,
    kind: String,
    date: String,
    start_time: String,
    end_time: String,
    location: Option<String>,
    category: Option<String>,
    subject: Option<String>,
    professor: Option<String>,
    color: String,
    created_at: String,
}

impl EventRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            title: row.get(2)?,
            kind: row.get(3)?,
            date: row.get(4)?,
            start_time: row.get(5)?,
            end_time: row.get(6)?,
            location: row.get(7)?,
            category: row.get(8)?,
            subject: row.get(9)?,
            professor: row.get(10)?,
            color: row.get(11)?,
            created_at: row.get(12)?,
        })
    }

    fn into_event(self) -> DomainResult<CalendarEvent> {
        let corrupt = |what: &str, value: &str| {
            let message = format!("stored event {} has invalid {what}: {value}", self.id);
            SlotwiseError::Persistence(message)
        };

        let kind: EventKind = self.kind.parse().map_err(|_| corrupt("kind", &self.kind))?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| corrupt("date", &self.date))?;
        let created_at = NaiveDateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT)
            .map_err(|_| corrupt("created_at", &self.created_at))?;

        Ok(CalendarEvent {
            id: EventId::from(self.id),
            owner: self.owner,
            title: self.title,
            kind,
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            category: self.category,
            subject: self.subject,
            professor: self.professor,
            color: self.color,
            created_at,
        })
    }
}

fn query_events<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> DomainResult<Vec<CalendarEvent>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let rows = stmt.query_map(params, EventRow::from_row).map_err(map_sql_error)?;

    let mut events = Vec::new();
    for row in rows {
        events.push(row.map_err(map_sql_error)?.into_event()?);
    }
    Ok(events)
}
