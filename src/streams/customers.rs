//! Customers stream
//!
//! Flattens each customer envelope into a normalized flat record: the six
//! timestamp attributes plus `birth` are converted to ISO 8601, a fixed
//! set of upstream-only attributes is deleted, and the envelope id is
//! coerced to an integer. The projection is allow-by-deletion: unknown
//! upstream additions pass through, everything on the drop list does not.

use super::{coerce_id, RecordExtractor};
use crate::api::PagePayload;
use crate::error::Result;
use crate::normalize::{normalize_date_field, normalize_datetime_field};
use crate::types::{JsonObject, JsonValue};
use serde_json::json;

/// Stream name
pub const STREAM_NAME: &str = "customers";

/// Timestamp attributes converted to ISO 8601 combined form
const DATETIME_FIELDS: [&str; 6] = [
    "created_at",
    "updated_at",
    "deleted_at",
    "first_order_completed_at",
    "last_order_completed_at",
    "point_expired_at",
];

/// Attributes that exist upstream but must not reach the output schema
const DROPPED_FIELDS: [&str; 18] = [
    "type",
    "accepts_marketing_updated_at",
    "is_auto_generated_email",
    "name",
    "name_kana",
    "tel",
    "mobile",
    "mobile_email",
    "birthday",
    "postal_code",
    "prefecture",
    "city",
    "street",
    "building",
    "company_name",
    "department",
    "customer_code",
    "customer_status",
];

/// Extractor for the `customers` stream
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomersExtractor;

impl RecordExtractor for CustomersExtractor {
    fn name(&self) -> &'static str {
        STREAM_NAME
    }

    fn json_schema(&self) -> JsonValue {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "integer", "description": "顧客ID"},
                "authentication_token": {"type": ["string", "null"], "description": "認証トークン"},
                "number": {"type": ["string", "null"], "description": "会員番号"},
                "state": {"type": ["string", "null"], "description": "会員状態"},
                "human_state_name": {"type": ["string", "null"], "description": "会員状態名"},
                "customer_rank_name": {"type": ["string", "null"], "description": "会員ランク名"},
                "email": {"type": ["string", "null"], "description": "メールアドレス"},
                "sex_id": {"type": ["integer", "null"], "description": "性別ID"},
                "sex": {"type": ["string", "null"], "description": "性別"},
                "job": {"type": ["string", "null"], "description": "職業"},
                "birth": {"type": ["string", "null"], "format": "date", "description": "生年月日"},
                "buy_times": {"type": ["integer", "null"], "description": "購入回数"},
                "buy_total": {"type": ["integer", "null"], "description": "購入金額合計"},
                "first_order_completed_at": {"type": ["string", "null"], "format": "date-time", "description": "初回注文完了日時"},
                "last_order_completed_at": {"type": ["string", "null"], "format": "date-time", "description": "最終注文完了日時"},
                "point": {"type": ["integer", "null"], "description": "保有ポイント"},
                "point_expired_at": {"type": ["string", "null"], "format": "date-time", "description": "ポイント失効日時"},
                "customer_type_name": {"type": ["string", "null"], "description": "顧客タイプ名"},
                "optin": {"type": ["boolean", "null"], "description": "メルマガ受信可否"},
                "line_id": {"type": ["string", "null"], "description": "LINE ID"},
                "tenant_id": {"type": ["integer", "null"], "description": "テナントID"},
                "mail_delivery_stop": {"type": ["boolean", "null"], "description": "メール配信停止"},
                "np_royal_customer": {"type": ["boolean", "null"], "description": "NP優良顧客"},
                "blacklist": {"type": ["boolean", "null"], "description": "ブラックリスト"},
                "blacklist_reasons": {"type": ["string", "null"], "description": "ブラックリスト理由"},
                "labels": {"type": ["string", "null"], "description": "ラベル"},
                "coupon_codes": {"type": ["string", "null"], "description": "クーポンコード"},
                "link_number": {"type": ["string", "null"], "description": "連携番号"},
                "created_at": {"type": ["string", "null"], "format": "date-time", "description": "作成日時"},
                "updated_at": {"type": ["string", "null"], "format": "date-time", "description": "更新日時"},
                "deleted_at": {"type": ["string", "null"], "format": "date-time", "description": "削除日時"}
            }
        })
    }

    fn extract_records_from_page(&self, page: &PagePayload) -> Result<Vec<JsonObject>> {
        page.data
            .iter()
            .map(|envelope| {
                let mut record = envelope.attributes.clone();

                for field in DATETIME_FIELDS {
                    normalize_datetime_field(&mut record, field);
                }
                normalize_date_field(&mut record, "birth");

                for field in DROPPED_FIELDS {
                    record.remove(field);
                }

                let id = coerce_id(&envelope.id, STREAM_NAME)?;
                record.insert("id".to_string(), JsonValue::from(id));
                Ok(record)
            })
            .collect()
    }
}
