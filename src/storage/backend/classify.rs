//! 数据库错误分类
//!
//! 连接类错误（连接池获取失败、连接断开、连接池已关闭）上报为
//! StoreUnavailable，其余为 StoreOperation。不做重试。

use sea_orm::DbErr;

/// 判断数据库错误是否属于连接问题
pub fn is_connectivity_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => {
            is_connectivity_runtime_error(runtime_err)
        }
        _ => false,
    }
}

fn is_connectivity_runtime_error(err: &sea_orm::error::RuntimeErr) -> bool {
    use sea_orm::error::RuntimeErr;

    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            use sea_orm::sqlx::Error as SqlxError;
            use std::ops::Deref;

            match sqlx_err.deref() {
                SqlxError::Io(_)
                | SqlxError::PoolTimedOut
                | SqlxError::PoolClosed
                | SqlxError::WorkerCrashed => true,
                other => is_connectivity_message(&other.to_string().to_lowercase()),
            }
        }
        RuntimeErr::Internal(msg) => is_connectivity_message(&msg.to_lowercase()),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

/// 通过错误消息判断（回退方案）
fn is_connectivity_message(err_str: &str) -> bool {
    err_str.contains("connection refused")
        || err_str.contains("connection reset")
        || err_str.contains("broken pipe")
        || err_str.contains("pool closed")
        || err_str.contains("pool timed out")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::error::RuntimeErr;

    #[test]
    fn test_connection_errors_are_connectivity() {
        assert!(is_connectivity_error(&DbErr::Conn(RuntimeErr::Internal(
            "anything".to_string()
        ))));
        assert!(is_connectivity_error(&DbErr::Exec(RuntimeErr::Internal(
            "Connection refused (os error 111)".to_string()
        ))));
    }

    #[test]
    fn test_query_errors_are_not_connectivity() {
        assert!(!is_connectivity_error(&DbErr::Custom(
            "unique constraint".to_string()
        )));
        assert!(!is_connectivity_error(&DbErr::Query(RuntimeErr::Internal(
            "no such column: shows".to_string()
        ))));
        assert!(!is_connectivity_error(&DbErr::RecordNotFound(
            "rotation".to_string()
        )));
    }
}
