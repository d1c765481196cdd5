//! Single-writer actor for the SQLite database.
//!
//! SQLite allows one writer at a time; funneling every write through one
//! dedicated connection avoids SQLITE_BUSY storms under concurrent requests.
//!
//! Each submitted job carries its own typed oneshot reply channel, so the
//! actor's queue holds plain `FnOnce(&mut SqliteConnection)` tasks and no
//! type erasure is needed on the return path. A job runs inside an immediate
//! transaction; a stopped actor surfaces as a `DatabaseError` to the caller
//! rather than a panic.

use diesel::Connection;
use diesel::SqliteConnection;
use log::info;
use tokio::sync::{mpsc, oneshot};

use markops_core::errors::{DatabaseError, Error, Result};

use super::{get_connection, DbPool};
use crate::errors::StorageError;

/// A queued unit of work. The reply channel is captured inside the closure,
/// so the task is fire-and-forget from the actor's point of view.
type WriteTask = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

fn actor_gone() -> Error {
    Error::Database(DatabaseError::TransactionFailed(
        "write actor is not running".to_string(),
    ))
}

/// Handle for sending jobs to the writer actor. Cheap to clone; the actor
/// stops once every handle is dropped and the queue drains.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<WriteTask>,
}

impl WriteHandle {
    /// Runs `job` on the writer's dedicated connection, inside an immediate
    /// transaction. Errors the job returns pass through unchanged; a stopped
    /// actor maps to `DatabaseError::TransactionFailed`.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let task: WriteTask = Box::new(move |conn| {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);
            // The requester may have been cancelled; nothing to do then.
            let _ = reply_tx.send(result);
        });

        self.tx.send(task).await.map_err(|_| actor_gone())?;
        reply_rx.await.map_err(|_| actor_gone())?
    }
}

/// Spawns a background Tokio task that acts as the single writer. The actor
/// checks out one pooled connection for its whole lifetime and processes
/// queued tasks serially.
pub fn spawn_writer(pool: &DbPool) -> Result<WriteHandle> {
    let mut conn = get_connection(pool)?;
    let (tx, mut rx) = mpsc::channel::<WriteTask>(1024);

    tokio::spawn(async move {
        while let Some(task) = rx.recv().await {
            task(&mut conn);
        }
        info!("Write actor queue closed; stopping");
    });

    Ok(WriteHandle { tx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;
    use diesel::r2d2::{ConnectionManager, Pool};

    fn memory_pool() -> DbPool {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        Pool::builder()
            .max_size(1)
            .build(manager)
            .expect("build in-memory pool")
    }

    #[tokio::test]
    async fn exec_returns_the_job_value_typed() {
        let writer = spawn_writer(&memory_pool()).unwrap();
        let count = writer
            .exec(|conn| {
                diesel::sql_query("CREATE TABLE scratch (x INTEGER)")
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(42usize)
            })
            .await
            .unwrap();
        assert_eq!(count, 42);
    }

    #[tokio::test]
    async fn exec_passes_job_errors_through_unchanged() {
        let writer = spawn_writer(&memory_pool()).unwrap();
        let err = writer
            .exec(|_conn| -> Result<()> { Err(Error::NotFound("missing row".to_string())) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn jobs_run_serially_on_one_connection() {
        let writer = spawn_writer(&memory_pool()).unwrap();
        writer
            .exec(|conn| {
                diesel::sql_query("CREATE TABLE counters (n INTEGER)")
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
            .unwrap();
        for _ in 0..3 {
            writer
                .exec(|conn| {
                    diesel::sql_query("INSERT INTO counters (n) VALUES (1)")
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    Ok(())
                })
                .await
                .unwrap();
        }

        #[derive(QueryableByName)]
        struct Count {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            n: i64,
        }
        let total = writer
            .exec(|conn| {
                let row: Count = diesel::sql_query("SELECT COUNT(*) AS n FROM counters")
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(row.n)
            })
            .await
            .unwrap();
        assert_eq!(total, 3);
    }
}
