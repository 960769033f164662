use crate::storage::{LinkRecord, Visit};
use migration::entities::{link, link_visit};

/// 将 links 行与其访问记录组装为 LinkRecord
///
/// `visits` 必须已按自增 id 升序排列。
pub fn model_to_record(model: link::Model, visits: Vec<link_visit::Model>) -> LinkRecord {
    LinkRecord {
        id: model.short_code,
        destination: model.destination,
        visits: visits.into_iter().map(visit_model_to_visit).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn visit_model_to_visit(model: link_visit::Model) -> Visit {
    Visit {
        timestamp: model.timestamp,
    }
}
