//! Admin-published content: matches, their score lines, and football news.
//!
//! Admins see and change only their own rows; clubs and players read
//! everything that is live.

use sqlx::PgPool;

use crate::database::models::matches::NewMatch;
use crate::database::models::{FootballNews, Match, MatchPoint};
use crate::database::status::{MatchState, Transition, NEWS_LIVE};
use crate::database::{found, reason, StoreError};

/// Restricts a read to one admin's rows, or lets every admin's rows through.
#[derive(Debug, Clone, Copy)]
pub enum Owner {
    Admin(i64),
    Anyone,
}

impl Owner {
    fn admin_id(self) -> Option<i64> {
        match self {
            Owner::Admin(id) => Some(id),
            Owner::Anyone => None,
        }
    }
}

// `$1` is the optional owner; NULL matches every admin.
const OWNER_SCOPE: &str = "($1::BIGINT IS NULL OR admin_id = $1)";

pub async fn insert_match(pool: &PgPool, admin_id: i64, fixture: NewMatch) -> Result<Match, StoreError> {
    let created = sqlx::query_as::<_, Match>(
        "INSERT INTO matches (admin_id, match_name, home_team_name, away_team_name, home_team_image,
                              away_team_image, match_location, match_prize, match_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(admin_id)
    .bind(&fixture.name)
    .bind(&fixture.home_team_name)
    .bind(&fixture.away_team_name)
    .bind(&fixture.home_team_image)
    .bind(&fixture.away_team_image)
    .bind(&fixture.location)
    .bind(&fixture.prize)
    .bind(&fixture.date)
    .fetch_one(pool)
    .await?;

    tracing::info!(match_id = created.match_id, admin_id, "match added");
    Ok(created)
}

pub async fn list_matches(pool: &PgPool, owner: Owner, state: MatchState) -> Result<Vec<Match>, StoreError> {
    let sql = format!(
        "SELECT * FROM matches WHERE {} AND {} ORDER BY added_date DESC",
        OWNER_SCOPE,
        state.predicate()
    );
    Ok(sqlx::query_as::<_, Match>(&sql).bind(owner.admin_id()).fetch_all(pool).await?)
}

pub async fn find_match(pool: &PgPool, owner: Owner, match_id: i64, state: MatchState) -> Result<Match, StoreError> {
    let sql = format!(
        "SELECT * FROM matches WHERE {} AND match_id = $2 AND {}",
        OWNER_SCOPE,
        state.predicate()
    );
    let row = sqlx::query_as::<_, Match>(&sql)
        .bind(owner.admin_id())
        .bind(match_id)
        .fetch_optional(pool)
        .await?;
    found(row, state.not_found())
}

/// Applies `END_MATCH` or `DELETE_MATCH` to one of the admin's matches.
pub async fn transition_match(
    pool: &PgPool,
    admin_id: i64,
    match_id: i64,
    transition: Transition,
) -> Result<Match, StoreError> {
    let sql = transition.update_sql("matches", "match_id = $1 AND admin_id = $2");
    let row = sqlx::query_as::<_, Match>(&sql)
        .bind(match_id)
        .bind(admin_id)
        .fetch_optional(pool)
        .await?;

    let updated = found(row, transition.rejection)?;
    tracing::info!(match_id, admin_id, change = transition.assigns, "match status changed");
    Ok(updated)
}

/// Records a score line, copying team details from the match in the same statement.
pub async fn insert_point(
    pool: &PgPool,
    admin_id: i64,
    match_id: i64,
    team_one_goals: i32,
    team_two_goals: i32,
) -> Result<MatchPoint, StoreError> {
    let sql = format!(
        "INSERT INTO points (admin_id, match_id, match_name, home_team_name, away_team_name, home_team_image,
                             away_team_image, team_one_total_goals_in_match, team_two_total_goals_in_match)
         SELECT admin_id, match_id, match_name, home_team_name, away_team_name, home_team_image,
                away_team_image, $3, $4
         FROM matches
         WHERE match_id = $2 AND admin_id = $1 AND {}
         RETURNING *",
        MatchState::Present.predicate()
    );
    let row = sqlx::query_as::<_, MatchPoint>(&sql)
        .bind(admin_id)
        .bind(match_id)
        .bind(team_one_goals)
        .bind(team_two_goals)
        .fetch_optional(pool)
        .await?;

    let point = found(row, reason::MATCH_NOT_FOUND)?;
    tracing::info!(point_id = point.point_id, match_id, "match point recorded");
    Ok(point)
}

/// Score lines of matches that are still present.
pub async fn list_points(pool: &PgPool, owner: Owner) -> Result<Vec<MatchPoint>, StoreError> {
    let sql = "SELECT p.* FROM points p
               JOIN matches m ON m.match_id = p.match_id
               WHERE ($1::BIGINT IS NULL OR p.admin_id = $1) AND NOT m.delete_status
               ORDER BY p.added_date DESC";
    Ok(sqlx::query_as::<_, MatchPoint>(sql).bind(owner.admin_id()).fetch_all(pool).await?)
}

pub async fn insert_news(
    pool: &PgPool,
    admin_id: i64,
    title: &str,
    content: &str,
    image: &str,
) -> Result<FootballNews, StoreError> {
    let created = sqlx::query_as::<_, FootballNews>(
        "INSERT INTO football_news (admin_id, football_news_title, football_news_content, football_news_image)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(admin_id)
    .bind(title)
    .bind(content)
    .bind(image)
    .fetch_one(pool)
    .await?;

    tracing::info!(football_news_id = created.football_news_id, admin_id, "news published");
    Ok(created)
}

pub async fn list_news(pool: &PgPool, owner: Owner) -> Result<Vec<FootballNews>, StoreError> {
    let sql = format!(
        "SELECT * FROM football_news WHERE {} AND {} ORDER BY added_date DESC",
        OWNER_SCOPE, NEWS_LIVE
    );
    Ok(sqlx::query_as::<_, FootballNews>(&sql)
        .bind(owner.admin_id())
        .fetch_all(pool)
        .await?)
}

pub async fn find_news(pool: &PgPool, owner: Owner, news_id: i64) -> Result<FootballNews, StoreError> {
    let sql = format!(
        "SELECT * FROM football_news WHERE {} AND football_news_id = $2 AND {}",
        OWNER_SCOPE, NEWS_LIVE
    );
    let row = sqlx::query_as::<_, FootballNews>(&sql)
        .bind(owner.admin_id())
        .bind(news_id)
        .fetch_optional(pool)
        .await?;
    found(row, reason::NEWS_NOT_FOUND)
}

pub async fn transition_news(
    pool: &PgPool,
    admin_id: i64,
    news_id: i64,
    transition: Transition,
) -> Result<FootballNews, StoreError> {
    let sql = transition.update_sql("football_news", "football_news_id = $1 AND admin_id = $2");
    let row = sqlx::query_as::<_, FootballNews>(&sql)
        .bind(news_id)
        .bind(admin_id)
        .fetch_optional(pool)
        .await?;

    let updated = found(row, transition.rejection)?;
    tracing::info!(news_id, admin_id, change = transition.assigns, "news status changed");
    Ok(updated)
}
