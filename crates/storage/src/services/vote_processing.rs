//! Recording one comparison outcome: the `cast_vote` transaction.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::vote::{CastVoteRequest, VoteOutcome};
use crate::error::{Result, StorageError};
use crate::models::{RatingRecord, Winner};
use crate::services::{elo, quota};

/// Record one comparison outcome for `voter_id`.
///
/// Runs as a single transaction: append the comparison (or bail with
/// `DuplicatePair`), apply the Elo update to both submissions from their
/// pre-comparison ratings, bump the voter's progress, and mark the voter's
/// own submission for `today` once they enter the ranking. A failure at any
/// step rolls the whole outcome back.
///
/// `today` is the date of the submission the vote unlocks, not the
/// challenge-day being voted on; voting on yesterday's pool enters today's
/// submission into today's ranking.
pub async fn cast_vote(
    pool: &PgPool,
    voter_id: Uuid,
    today: NaiveDate,
    request: &CastVoteRequest,
) -> Result<VoteOutcome> {
    let mut tx = pool.begin().await?;

    check_pair(&mut tx, voter_id, request).await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO comparisons (voter_id, challenge_date, submission_a, submission_b, winner)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(voter_id)
    .bind(request.challenge_date)
    .bind(request.submission_a)
    .bind(request.submission_b)
    .bind(request.winner)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Err(StorageError::DuplicatePair {
            voter_id,
            submission_a: request.submission_a,
            submission_b: request.submission_b,
        });
    }

    let required = required_votes_for(&mut tx, voter_id, request.challenge_date).await?;
    let current = lock_progress(&mut tx, voter_id, request.challenge_date, required).await?;
    let (outcome, transitioned) = advance_progress(current, request.winner.is_some());

    if let Some(winner_id) = request.winner {
        let winner = if winner_id == request.submission_a {
            Winner::A
        } else {
            Winner::B
        };
        update_ratings(&mut tx, request, winner).await?;
        store_progress(&mut tx, voter_id, request.challenge_date, &outcome).await?;

        if transitioned {
            mark_own_submission(&mut tx, voter_id, today).await?;
        }
    }
    // A skip burns the pair but moves nothing else.

    tx.commit().await?;

    Ok(outcome)
}

/// One step of the voting-progress state machine. A counted comparison
/// increments the vote count, and entry into the ranking fires the instant
/// the post-increment count reaches the quota; a skip changes nothing. The
/// flag reports whether this step performed the transition into the
/// ranking, which happens at most once per (voter, challenge-day) since the
/// count only ever grows and entry never reverts.
fn advance_progress(current: VoteOutcome, counted: bool) -> (VoteOutcome, bool) {
    if !counted {
        return (current, false);
    }

    let vote_count = current.vote_count + 1;
    let entered_ranking = current.entered_ranking || vote_count >= current.required_votes;
    let transitioned = entered_ranking && !current.entered_ranking;

    (
        VoteOutcome {
            vote_count,
            required_votes: current.required_votes,
            entered_ranking,
        },
        transitioned,
    )
}

/// Both submissions must exist, belong to the challenge-day being voted on,
/// and not belong to the voter. The pair selector never produces a voter's
/// own submission, so seeing one here is an invariant violation.
async fn check_pair(
    conn: &mut PgConnection,
    voter_id: Uuid,
    request: &CastVoteRequest,
) -> Result<()> {
    let rows = sqlx::query_as::<_, (Uuid, Uuid, NaiveDate)>(
        r#"
        SELECT submission_id, user_id, challenge_date
        FROM submissions
        WHERE submission_id = ANY($1)
        "#,
    )
    .bind(vec![request.submission_a, request.submission_b])
    .fetch_all(conn)
    .await?;

    if rows.len() != 2 {
        return Err(StorageError::NotFound);
    }

    for (submission_id, user_id, challenge_date) in rows {
        if challenge_date != request.challenge_date {
            return Err(StorageError::ConstraintViolation(format!(
                "Submission {submission_id} does not belong to challenge-day {}",
                request.challenge_date
            )));
        }

        if user_id == voter_id {
            return Err(StorageError::SelfPairing {
                voter_id,
                submission_id,
                challenge_date,
            });
        }
    }

    Ok(())
}

/// Quota for this voter, from the count of other users' submissions. Only
/// consulted when the progress row does not exist yet; an existing row keeps
/// the quota it was created with.
async fn required_votes_for(
    conn: &mut PgConnection,
    voter_id: Uuid,
    challenge_date: NaiveDate,
) -> Result<i32> {
    let others = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM submissions
        WHERE challenge_date = $1 AND user_id <> $2
        "#,
    )
    .bind(challenge_date)
    .bind(voter_id)
    .fetch_one(conn)
    .await?;

    Ok(quota::required_votes(others) as i32)
}

/// Apply the Elo update to both rating records, reading both pre-comparison
/// ratings in one locked statement so the zero-sum math holds under
/// concurrent votes. Records are created on first touch.
async fn update_ratings(
    conn: &mut PgConnection,
    request: &CastVoteRequest,
    winner: Winner,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO rating_records (submission_id, challenge_date)
        VALUES ($1, $3), ($2, $3)
        ON CONFLICT (submission_id, challenge_date) DO NOTHING
        "#,
    )
    .bind(request.submission_a)
    .bind(request.submission_b)
    .bind(request.challenge_date)
    .execute(&mut *conn)
    .await?;

    // Locked in submission-id order so concurrent votes on overlapping
    // pairs cannot deadlock.
    let records = sqlx::query_as::<_, RatingRecord>(
        r#"
        SELECT submission_id, challenge_date, rating, vote_count, final_rank, updated_at
        FROM rating_records
        WHERE challenge_date = $1 AND submission_id = ANY($2)
        ORDER BY submission_id
        FOR UPDATE
        "#,
    )
    .bind(request.challenge_date)
    .bind(vec![request.submission_a, request.submission_b])
    .fetch_all(&mut *conn)
    .await?;

    let mut rating_a = elo::DEFAULT_RATING;
    let mut rating_b = elo::DEFAULT_RATING;
    for record in records {
        if record.submission_id == request.submission_a {
            rating_a = record.rating;
        } else {
            rating_b = record.rating;
        }
    }

    let (new_a, new_b) = elo::apply_comparison(rating_a, rating_b, winner);

    for (submission_id, new_rating) in [
        (request.submission_a, new_a),
        (request.submission_b, new_b),
    ] {
        sqlx::query(
            r#"
            UPDATE rating_records
            SET rating = $1, vote_count = vote_count + 1, updated_at = NOW()
            WHERE submission_id = $2 AND challenge_date = $3
            "#,
        )
        .bind(new_rating)
        .bind(submission_id)
        .bind(request.challenge_date)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Ensure the voter's progress row exists and lock it for this transaction.
/// The row is created here, on the voter's first comparison or skip, with
/// the quota frozen at that moment; an existing row keeps its quota.
async fn lock_progress(
    conn: &mut PgConnection,
    voter_id: Uuid,
    challenge_date: NaiveDate,
    required_votes: i32,
) -> Result<VoteOutcome> {
    sqlx::query(
        r#"
        INSERT INTO voting_progress (user_id, challenge_date, required_votes)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, challenge_date) DO NOTHING
        "#,
    )
    .bind(voter_id)
    .bind(challenge_date)
    .bind(required_votes)
    .execute(&mut *conn)
    .await?;

    let (vote_count, required_votes, entered_ranking) = sqlx::query_as::<_, (i32, i32, bool)>(
        r#"
        SELECT vote_count, required_votes, entered_ranking
        FROM voting_progress
        WHERE user_id = $1 AND challenge_date = $2
        FOR UPDATE
        "#,
    )
    .bind(voter_id)
    .bind(challenge_date)
    .fetch_one(&mut *conn)
    .await?;

    Ok(VoteOutcome {
        vote_count,
        required_votes,
        entered_ranking,
    })
}

async fn store_progress(
    conn: &mut PgConnection,
    voter_id: Uuid,
    challenge_date: NaiveDate,
    outcome: &VoteOutcome,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE voting_progress
        SET vote_count = $1, entered_ranking = $2
        WHERE user_id = $3 AND challenge_date = $4
        "#,
    )
    .bind(outcome.vote_count)
    .bind(outcome.entered_ranking)
    .bind(voter_id)
    .bind(challenge_date)
    .execute(conn)
    .await?;

    Ok(())
}

/// Flip `included_in_ranking` on the voter's submission for `today`. A
/// voter without a submission today simply has nothing to mark.
async fn mark_own_submission(
    conn: &mut PgConnection,
    voter_id: Uuid,
    today: NaiveDate,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE submissions
        SET included_in_ranking = TRUE
        WHERE user_id = $1 AND challenge_date = $2
        "#,
    )
    .bind(voter_id)
    .bind(today)
    .execute(conn)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(vote_count: i32, required_votes: i32, entered_ranking: bool) -> VoteOutcome {
        VoteOutcome {
            vote_count,
            required_votes,
            entered_ranking,
        }
    }

    #[test]
    fn entry_fires_exactly_at_quota() {
        let (after, transitioned) = advance_progress(progress(1, 3, false), true);
        assert_eq!(after.vote_count, 2);
        assert!(!after.entered_ranking);
        assert!(!transitioned);

        let (after, transitioned) = advance_progress(after, true);
        assert_eq!(after.vote_count, 3);
        assert!(after.entered_ranking);
        assert!(transitioned);
    }

    #[test]
    fn transition_fires_once_per_day() {
        // Quota 5 with six pairs available: the leftover sixth vote must not
        // grant ranking entry a second time.
        let mut state = progress(0, 5, false);
        let mut transitions = 0;
        for _ in 0..6 {
            let (next, transitioned) = advance_progress(state, true);
            if transitioned {
                transitions += 1;
            }
            state = next;
        }
        assert_eq!(state.vote_count, 6);
        assert!(state.entered_ranking);
        assert_eq!(transitions, 1);
    }

    #[test]
    fn skip_changes_nothing() {
        let before = progress(2, 3, false);
        let (after, transitioned) = advance_progress(before, false);
        assert_eq!(after.vote_count, 2);
        assert_eq!(after.required_votes, 3);
        assert!(!after.entered_ranking);
        assert!(!transitioned);
    }

    #[test]
    fn count_monotone_and_entry_never_reverts() {
        let mut state = progress(0, 3, false);
        for counted in [true, false, true, true, false, true] {
            let (next, _) = advance_progress(state, counted);
            assert!(next.vote_count >= state.vote_count);
            assert!(next.entered_ranking || !state.entered_ranking);
            state = next;
        }
        assert_eq!(state.vote_count, 4);
        assert!(state.entered_ranking);
    }

    #[test]
    fn single_pair_pool_enters_on_first_vote() {
        let (after, transitioned) = advance_progress(progress(0, 1, false), true);
        assert_eq!(after.vote_count, 1);
        assert!(after.entered_ranking);
        assert!(transitioned);
    }
}
