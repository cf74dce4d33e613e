//! Dashboard metrics

use chrono::{DateTime, Utc};

use crate::db::StoreError;
use crate::features::clients::store::ClientStore;
use crate::features::clients::types::ClientMetrics;

/// Midnight UTC of the given instant's day
pub fn start_of_utc_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

pub async fn handle(store: &dyn ClientStore) -> Result<ClientMetrics, StoreError> {
    store.metrics(start_of_utc_day(Utc::now())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_of_utc_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 12).unwrap();
        assert_eq!(
            start_of_utc_day(now),
            Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()
        );
    }
}
