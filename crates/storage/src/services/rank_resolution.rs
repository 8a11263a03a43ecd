//! Turning accumulated ratings into published ranks.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::ranking::{DailyRankingResponse, RankedSubmissionInfo, RankingEntry};
use crate::error::{Result, StorageError};
use crate::repository::rating::{RatedSubmissionRow, RatingRepository};
use crate::repository::submission::SubmissionRepository;

/// Competition-style rank assignment over (submission, rating) pairs.
///
/// Sorted by rating descending; equal ratings share a rank and the next
/// distinct rating takes rank = entries-above + 1 (1-1-3). Order within a
/// tie is ascending submission id, so the output is fully deterministic.
pub fn assign_ranks(mut records: Vec<(Uuid, i32)>) -> Vec<(Uuid, i32)> {
    records.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut ranked = Vec::with_capacity(records.len());
    let mut current_rank = 0;
    let mut previous_rating = None;

    for (position, (submission_id, rating)) in records.into_iter().enumerate() {
        if previous_rating != Some(rating) {
            current_rank = position as i32 + 1;
            previous_rating = Some(rating);
        }
        ranked.push((submission_id, current_rank));
    }

    ranked
}

/// Create default rating records for every submission of the day. Requires
/// at least two submissions; rerunning is a no-op for existing records.
pub async fn initialize_challenge(pool: &PgPool, challenge_date: NaiveDate) -> Result<u64> {
    let submissions = SubmissionRepository::new(pool)
        .count_for_day(challenge_date, None)
        .await?;

    if submissions < 2 {
        return Err(StorageError::ConstraintViolation(format!(
            "Challenge-day {challenge_date} has {submissions} submissions; at least 2 are needed for a ranking"
        )));
    }

    RatingRepository::new(pool).init_for_day(challenge_date).await
}

/// Compute and persist final ranks for the day's included submissions.
/// Idempotent: unchanged ratings produce the same assignment.
pub async fn resolve_final_ranks(
    pool: &PgPool,
    challenge_date: NaiveDate,
) -> Result<DailyRankingResponse> {
    let rows = RatingRepository::new(pool)
        .list_included_for_day(challenge_date)
        .await?;

    if rows.is_empty() {
        return Err(StorageError::NotFound);
    }

    let ranks = assign_ranks(rows.iter().map(|r| (r.submission_id, r.rating)).collect());

    let mut tx = pool.begin().await?;
    for (submission_id, rank) in &ranks {
        sqlx::query(
            r#"
            UPDATE rating_records
            SET final_rank = $1, updated_at = NOW()
            WHERE submission_id = $2 AND challenge_date = $3
            "#,
        )
        .bind(rank)
        .bind(submission_id)
        .bind(challenge_date)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    let entries = rows
        .into_iter()
        .zip(ranks)
        .map(|(row, (_, rank))| to_entry(row, rank))
        .collect();

    Ok(DailyRankingResponse {
        challenge_date,
        entries,
    })
}

/// The published ranking for a day; `NotFound` until it has been resolved.
pub async fn get_ranking(pool: &PgPool, challenge_date: NaiveDate) -> Result<DailyRankingResponse> {
    let rows = RatingRepository::new(pool)
        .list_resolved_for_day(challenge_date)
        .await?;

    if rows.is_empty() {
        return Err(StorageError::NotFound);
    }

    let entries = rows
        .into_iter()
        .map(|row| {
            let rank = row.final_rank.unwrap_or_default();
            to_entry(row, rank)
        })
        .collect();

    Ok(DailyRankingResponse {
        challenge_date,
        entries,
    })
}

fn to_entry(row: RatedSubmissionRow, rank: i32) -> RankingEntry {
    RankingEntry {
        rank,
        rating: row.rating,
        vote_count: row.vote_count,
        submission: RankedSubmissionInfo {
            submission_id: row.submission_id,
            user_id: row.user_id,
            title: row.title,
            image_key: row.image_key,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn ranks_descend_from_highest_rating() {
        let ids = ids(3);
        let ranked = assign_ranks(vec![(ids[0], 980), (ids[1], 1040), (ids[2], 1000)]);
        assert_eq!(ranked, vec![(ids[1], 1), (ids[2], 2), (ids[0], 3)]);
    }

    #[test]
    fn tied_ratings_share_a_rank() {
        let ids = ids(4);
        let ranked = assign_ranks(vec![
            (ids[0], 1016),
            (ids[1], 1016),
            (ids[2], 1000),
            (ids[3], 984),
        ]);
        // 1-1-3-4: the rank after a two-way tie for first is 3.
        assert_eq!(
            ranked,
            vec![(ids[0], 1), (ids[1], 1), (ids[2], 3), (ids[3], 4)]
        );
    }

    #[test]
    fn multiple_winners_at_rank_one() {
        let ids = ids(3);
        let ranked = assign_ranks(vec![(ids[0], 1000), (ids[1], 1000), (ids[2], 1000)]);
        assert!(ranked.iter().all(|&(_, rank)| rank == 1));
    }

    #[test]
    fn assignment_is_idempotent() {
        let ids = ids(5);
        let records: Vec<(Uuid, i32)> = ids
            .iter()
            .zip([1200, 1100, 1100, 950, 950])
            .map(|(&id, rating)| (id, rating))
            .collect();

        let first = assign_ranks(records.clone());
        let second = assign_ranks(records);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }
}
