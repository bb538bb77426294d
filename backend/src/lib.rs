pub mod models;
pub mod schema;

pub mod error;

pub mod pubg_api;
pub mod storage;

pub mod normalizer;
pub mod resolver;

pub mod live;

pub mod api;

#[cfg(test)]
pub(crate) mod testutil;

pub async fn db_connection(database_url: &str) -> diesel_async::AsyncPgConnection {
    use diesel_async::AsyncConnection;

    diesel_async::AsyncPgConnection::establish(database_url)
        .await
        .unwrap_or_else(|e| panic!("Error connecting to {} - {:?}", database_url, e))
}
