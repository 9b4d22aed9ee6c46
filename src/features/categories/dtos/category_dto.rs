use serde::Deserialize;
use utoipa::ToSchema;

/// Request DTO for creating or replacing a category.
///
/// Fields default to empty strings so partial bodies decode the same way the
/// permissive JSON decoders of typical CRUD clients expect. Any `id` in the
/// body is ignored; ids are assigned by the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
