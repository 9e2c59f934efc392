use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use goalwise_core::errors::{DatabaseError, Error, Result};
use log::error;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection inside one transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // The Box<dyn Any + Send> is used for type erasure of the job's return type.
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, ErasedReply)>,
}

fn actor_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "Writer actor is not running".to_string(),
    ))
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Jobs run one at a time, each inside an immediate transaction, so a job
    /// either commits fully or not at all and never interleaves with another.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| actor_gone())?;

        let boxed = ret_rx.await.map_err(|_| actor_gone())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Unexpected("Writer actor returned an unexpected result type".to_string())
        })
    }
}

/// Spawns a background Tokio task that acts as a single writer to the database.
/// This actor owns one database connection from the pool and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job<Box<dyn Any + Send + 'static>>, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                let reason = e.to_string();
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(Error::Database(
                        DatabaseError::ConnectionFailed(reason.clone()),
                    )));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    // A panicking job rolls back and fails alone; the actor keeps serving.
                    match catch_unwind(AssertUnwindSafe(|| job(c))) {
                        Ok(outcome) => outcome.map_err(StorageError::from),
                        Err(_) => {
                            error!("Write job panicked; its transaction was rolled back");
                            Err(StorageError::from(Error::Unexpected(
                                "Write job panicked".to_string(),
                            )))
                        }
                    }
                })
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away (timeout or cancelled request).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

#[cfg(test)]
mod tests {
    use crate::test_support::setup_db;
    use diesel::prelude::*;
    use diesel::sql_query;
    use diesel::sql_types::BigInt;
    use goalwise_core::errors::{Error, Result};

    #[derive(QueryableByName)]
    struct Count {
        #[diesel(sql_type = BigInt)]
        n: i64,
    }

    fn run(c: &mut SqliteConnection, statement: &str) -> Result<()> {
        sql_query(statement)
            .execute(c)
            .map(|_| ())
            .map_err(|e| Error::Unexpected(e.to_string()))
    }

    #[tokio::test]
    async fn panicking_job_rolls_back_and_writer_keeps_running() {
        let db = setup_db();
        db.writer
            .exec(|c| run(c, "CREATE TABLE scratch (x INTEGER NOT NULL)"))
            .await
            .unwrap();

        let result = db
            .writer
            .exec(|c| -> Result<()> {
                run(c, "INSERT INTO scratch (x) VALUES (1)")?;
                panic!("job failed halfway");
            })
            .await;
        assert!(matches!(result, Err(Error::Unexpected(_))));

        let count = db
            .writer
            .exec(|c| -> Result<i64> {
                run(c, "INSERT INTO scratch (x) VALUES (2)")?;
                sql_query("SELECT COUNT(*) AS n FROM scratch")
                    .get_result::<Count>(c)
                    .map(|row| row.n)
                    .map_err(|e| Error::Unexpected(e.to_string()))
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
