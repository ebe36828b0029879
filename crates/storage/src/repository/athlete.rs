use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::CreateAthleteProfileRequest;
use crate::error::{Result, StorageError};
use crate::models::{AthleteProfile, ProfileWithOwner};
use crate::search::SearchQuery;

const PROFILE_COLUMNS: &str = "id, user_id, name, age, city, country, sport, position, level, \
     height, weight, graduation_year, highlights_url, bio, photo_url, phone, is_verified, \
     contact_email_visible, contact_phone_visible, created_at, updated_at";

#[derive(FromRow)]
struct SearchRow {
    #[sqlx(flatten)]
    profile: AthleteProfile,
    total_count: i64,
}

fn search_window_sql(query: &SearchQuery) -> QueryBuilder<'_, Postgres> {
    let mut select = QueryBuilder::new(format!(
        "SELECT {}, COUNT(*) OVER() AS total_count FROM athlete_profiles WHERE 1=1",
        PROFILE_COLUMNS
    ));
    query.push_predicates(&mut select);
    query.push_order_and_window(&mut select);
    select
}

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Run a directory search: the requested window of matching profiles and
    /// the total number of matches.
    ///
    /// The total rides along on every row as a window aggregate, so rows and
    /// count come from the same statement. Only a window past the last match
    /// has no row to carry it and needs a separate count.
    pub async fn search(&self, query: &SearchQuery) -> Result<(Vec<AthleteProfile>, i64)> {
        let rows: Vec<SearchRow> = search_window_sql(query)
            .build_query_as()
            .fetch_all(self.pool)
            .await?;

        let total_items = match rows.first() {
            Some(row) => row.total_count,
            None if query.window.offset == 0 => 0,
            None => {
                let mut count =
                    QueryBuilder::new("SELECT COUNT(*) FROM athlete_profiles WHERE 1=1");
                query.push_predicates(&mut count);
                count
                    .build_query_scalar::<i64>()
                    .fetch_one(self.pool)
                    .await?
            }
        };

        let profiles = rows.into_iter().map(|row| row.profile).collect();
        Ok((profiles, total_items))
    }

    /// Find a profile together with its owner's email
    pub async fn find_with_owner(&self, id: Uuid) -> Result<ProfileWithOwner> {
        let profile = sqlx::query_as::<_, ProfileWithOwner>(
            r#"
            SELECT p.id, p.user_id, p.name, p.age, p.city, p.country, p.sport, p.position,
                   p.level, p.height, p.weight, p.graduation_year, p.highlights_url, p.bio,
                   p.photo_url, p.phone, p.is_verified, p.contact_email_visible,
                   p.contact_phone_visible, p.created_at, p.updated_at,
                   u.email AS owner_email
            FROM athlete_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(profile)
    }

    /// The profile owned by an account, if it created one
    pub async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<AthleteProfile>> {
        let sql = format!(
            "SELECT {} FROM athlete_profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        );

        let profile = sqlx::query_as::<_, AthleteProfile>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(profile)
    }

    /// Every profile, newest first, for the verification board
    pub async fn list_newest_first(&self) -> Result<Vec<AthleteProfile>> {
        let sql = format!(
            "SELECT {} FROM athlete_profiles ORDER BY created_at DESC, id",
            PROFILE_COLUMNS
        );

        let profiles = sqlx::query_as::<_, AthleteProfile>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(profiles)
    }

    /// Create the profile owned by `user_id`. Always starts unverified.
    pub async fn create(
        &self,
        user_id: Uuid,
        req: &CreateAthleteProfileRequest,
    ) -> Result<AthleteProfile> {
        let sql = format!(
            r#"
            INSERT INTO athlete_profiles (
                user_id, name, age, city, country, sport, position, level, height, weight,
                graduation_year, highlights_url, bio, photo_url, phone,
                contact_email_visible, contact_phone_visible
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, AthleteProfile>(&sql)
            .bind(user_id)
            .bind(&req.name)
            .bind(req.age)
            .bind(&req.city)
            .bind(&req.country)
            .bind(&req.sport)
            .bind(&req.position)
            .bind(req.level)
            .bind(&req.height)
            .bind(&req.weight)
            .bind(req.graduation_year)
            .bind(&req.highlights_url)
            .bind(&req.bio)
            .bind(&req.photo_url)
            .bind(&req.phone)
            .bind(req.contact_email_visible)
            .bind(req.contact_phone_visible)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).into_constraint(
                    "An athlete profile already exists for this account",
                    "The owning account does not exist",
                )
            })
    }

    /// Store a new verification flag
    pub async fn set_verified(&self, id: Uuid, is_verified: bool) -> Result<AthleteProfile> {
        let sql = format!(
            r#"
            UPDATE athlete_profiles
            SET is_verified = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, AthleteProfile>(&sql)
            .bind(id)
            .bind(is_verified)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::search::SearchFilters;
    use crate::models::Level;

    #[test]
    fn test_window_and_total_share_one_statement() {
        let query = SearchQuery::from_filters(&SearchFilters {
            level: Some(Level::College),
            ..Default::default()
        });

        let builder = search_window_sql(&query);
        let sql = builder.sql();

        assert!(sql.contains("COUNT(*) OVER() AS total_count FROM athlete_profiles"));
        assert!(sql.ends_with("AND level = $1 ORDER BY created_at DESC, id LIMIT $2 OFFSET $3"));
    }
}
