use sea_orm::{
    entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, IntoActiveModel, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Keys that must be present in a create/update body. Empty strings are accepted.
pub const REQUIRED_FIELDS: [&str; 2] = ["image_url", "ai_label"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_labels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub image_id: i64,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    #[sea_orm(column_type = "Text")]
    pub ai_label: String,
    #[sea_orm(column_name = "human_1_score")]
    pub human_1_score: Option<i64>,
    #[sea_orm(column_name = "human_2_score")]
    pub human_2_score: Option<i64>,
    #[sea_orm(column_name = "human_3_score")]
    pub human_3_score: Option<i64>,
    #[sea_orm(column_name = "human_1_comment", column_type = "Text", nullable)]
    pub human_1_comment: Option<String>,
    #[sea_orm(column_name = "human_2_comment", column_type = "Text", nullable)]
    pub human_2_comment: Option<String>,
    #[sea_orm(column_name = "human_3_comment", column_type = "Text", nullable)]
    pub human_3_comment: Option<String>,
    pub ai_accuracy: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A record as submitted by clients: everything except `image_id`.
///
/// Optional fields that are absent from the body are stored as NULL. The same
/// value is echoed back by create and update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationInput {
    pub image_url: String,
    pub ai_label: String,
    pub human_1_score: Option<i64>,
    pub human_2_score: Option<i64>,
    pub human_3_score: Option<i64>,
    pub human_1_comment: Option<String>,
    pub human_2_comment: Option<String>,
    pub human_3_comment: Option<String>,
    pub ai_accuracy: Option<f64>,
}

impl AnnotationInput {
    /// Presence check first, then type check, so a missing key is always reported
    /// as such even when other fields are malformed.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        let Some(obj) = value.as_object() else {
            return Err(ModelError::InvalidBody("expected a JSON object".into()));
        };
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| !obj.contains_key(*f))
            .collect();
        if !missing.is_empty() {
            return Err(ModelError::MissingFields(missing));
        }
        serde_json::from_value(value).map_err(|e| ModelError::Validation(e.to_string()))
    }
}

impl From<Model> for AnnotationInput {
    fn from(m: Model) -> Self {
        Self {
            image_url: m.image_url,
            ai_label: m.ai_label,
            human_1_score: m.human_1_score,
            human_2_score: m.human_2_score,
            human_3_score: m.human_3_score,
            human_1_comment: m.human_1_comment,
            human_2_comment: m.human_2_comment,
            human_3_comment: m.human_3_comment,
            ai_accuracy: m.ai_accuracy,
        }
    }
}

impl IntoActiveModel<ActiveModel> for AnnotationInput {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            image_id: NotSet,
            image_url: Set(self.image_url),
            ai_label: Set(self.ai_label),
            human_1_score: Set(self.human_1_score),
            human_2_score: Set(self.human_2_score),
            human_3_score: Set(self.human_3_score),
            human_1_comment: Set(self.human_1_comment),
            human_2_comment: Set(self.human_2_comment),
            human_3_comment: Set(self.human_3_comment),
            ai_accuracy: Set(self.ai_accuracy),
        }
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find().order_by_asc(Column::ImageId).all(db).await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, image_id: i64) -> Result<Option<Model>, ModelError> {
    let found = Entity::find_by_id(image_id).one(db).await?;
    Ok(found)
}

/// Insert a record; the store assigns `image_id`.
pub async fn create(db: &DatabaseConnection, input: AnnotationInput) -> Result<Model, ModelError> {
    let am = input.into_active_model();
    let created = am.insert(db).await?;
    Ok(created)
}

/// Insert several records in one statement. Returns how many were inserted.
pub async fn create_many(db: &DatabaseConnection, inputs: Vec<AnnotationInput>) -> Result<u64, ModelError> {
    if inputs.is_empty() {
        return Ok(0);
    }
    let count = inputs.len() as u64;
    Entity::insert_many(inputs.into_iter().map(|i| -> ActiveModel { i.into_active_model() }))
        .exec(db)
        .await?;
    Ok(count)
}

/// Overwrite every column of the row. Returns the number of rows touched,
/// which is 0 when `image_id` does not exist.
pub async fn update(db: &DatabaseConnection, image_id: i64, input: AnnotationInput) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .set(input.into_active_model())
        .filter(Column::ImageId.eq(image_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Delete by id. Returns the number of rows removed (0 or 1).
pub async fn delete(db: &DatabaseConnection, image_id: i64) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(image_id).exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_body_leaves_optionals_empty() {
        let input = AnnotationInput::from_json(json!({"image_url": "uploads/a.jpg", "ai_label": "a red car"})).unwrap();
        assert_eq!(input.image_url, "uploads/a.jpg");
        assert_eq!(input.ai_label, "a red car");
        assert_eq!(input.human_1_score, None);
        assert_eq!(input.ai_accuracy, None);
    }

    #[test]
    fn empty_strings_count_as_present() {
        let input = AnnotationInput::from_json(json!({"image_url": "", "ai_label": ""})).unwrap();
        assert!(input.image_url.is_empty());
    }

    #[test]
    fn reports_each_missing_key() {
        match AnnotationInput::from_json(json!({"human_1_score": 3})) {
            Err(ModelError::MissingFields(f)) => assert_eq!(f, vec!["image_url", "ai_label"]),
            other => panic!("unexpected: {:?}", other),
        }
        match AnnotationInput::from_json(json!({"image_url": "x"})) {
            Err(ModelError::MissingFields(f)) => assert_eq!(f, vec!["ai_label"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_key_wins_over_bad_types() {
        let err = AnnotationInput::from_json(json!({"image_url": "x", "human_1_score": "high"})).unwrap_err();
        assert!(matches!(err, ModelError::MissingFields(_)));
    }

    #[test]
    fn non_object_body_is_invalid() {
        assert!(matches!(AnnotationInput::from_json(json!([1, 2])), Err(ModelError::InvalidBody(_))));
        assert!(matches!(AnnotationInput::from_json(json!("text")), Err(ModelError::InvalidBody(_))));
    }

    #[test]
    fn wrong_types_are_validation_errors() {
        let err = AnnotationInput::from_json(json!({"image_url": "x", "ai_label": "y", "human_2_score": "five"})).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
        let err = AnnotationInput::from_json(json!({"image_url": null, "ai_label": "y"})).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn full_body_and_extra_keys() {
        let input = AnnotationInput::from_json(json!({
            "image_url": "uploads/image1.jpg",
            "ai_label": "cat",
            "human_1_score": 1,
            "human_2_score": 0,
            "human_3_score": 1,
            "human_1_comment": "Looks correct",
            "human_2_comment": "I think it's a dog",
            "human_3_comment": "Agree with AI",
            "ai_accuracy": 85,
            "image_id": 42
        }))
        .unwrap();
        assert_eq!(input.human_2_comment.as_deref(), Some("I think it's a dog"));
        assert_eq!(input.ai_accuracy, Some(85.0));
    }

    #[test]
    fn active_model_leaves_id_unset() {
        let am = AnnotationInput { image_url: "u".into(), ai_label: "l".into(), ..Default::default() }.into_active_model();
        assert!(am.image_id.is_not_set());
        assert_eq!(am.human_3_comment, Set(None));
    }
}
