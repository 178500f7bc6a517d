//! The resources managed by the panel.

use crate::schema::{Editable, FieldSpec, FilterMode, ResourceSchema};
use anyhow::Result;

pub const BANNER_TYPES: &[&str] = &["home", "promo", "category", "bottom"];
pub const STATUSES: &[&str] = &["active", "inactive"];

/// Post categories: fetched whole and filtered locally.
pub fn categories() -> Result<ResourceSchema> {
    ResourceSchema::builder("categories", "Post Categories")
        .nouns("category", "categories")
        .collection("/api/post-categories")
        .field(FieldSpec::text("category_name", "Name").searchable().width(20))
        .field(FieldSpec::text("category_details", "Details").searchable().width(25))
        .field(FieldSpec::image("category_image", "Image"))
        .field(FieldSpec::count("posts", "Posts").width(8))
        .field(FieldSpec::choice("status", "Status", STATUSES).width(10))
        .field(FieldSpec::timestamp("created_at", "Created At").width(17))
        .status_filter()
        .build()
}

/// Banners: fetched whole and filtered locally, with an extra type filter.
pub fn banners() -> Result<ResourceSchema> {
    ResourceSchema::builder("banners", "Banners")
        .nouns("banner", "banners")
        .collection("/api/banner")
        .field(FieldSpec::text("banner_name", "Name").searchable().width(18))
        .field(FieldSpec::text("banner_title", "Title").searchable().width(22))
        .field(FieldSpec::image("image", "Image"))
        .field(FieldSpec::choice("type", "Type", BANNER_TYPES).width(10))
        .field(FieldSpec::choice("status", "Status", STATUSES).width(10))
        .field(FieldSpec::timestamp("created_at", "Created At").width(17))
        .status_filter()
        .type_filter("type", "Type")
        .build()
}

/// Users: filtered and paged by the backend.
pub fn users() -> Result<ResourceSchema> {
    ResourceSchema::builder("users", "Users")
        .nouns("user", "users")
        .list_path("/api/admin/users")
        .list_items("users")
        .create_path("/api/auth/register")
        .update_path("/api/admin/users/{id}")
        .delete_path("/api/auth/profile")
        .status_path("/api/admin/users/{id}/status")
        .filter_mode(FilterMode::Server)
        .field(FieldSpec::text("mobile_number", "Mobile").searchable().width(15))
        .field(FieldSpec::text("email", "Email").searchable().width(25))
        .field(FieldSpec::lookup("employeeid", "Employee ID").searchable().width(12))
        .field(FieldSpec::image("profile_image", "Image"))
        .field(FieldSpec::secret("password", "Password").omit_when_empty())
        .field(
            FieldSpec::text("validation_key", "Validation Key")
                .hidden()
                .editable(Editable::OnCreate),
        )
        .field(FieldSpec::choice("status", "Status", STATUSES).editable(Editable::Never).width(10))
        .field(FieldSpec::timestamp("created_at", "Created At").width(17))
        .status_filter()
        .employee_lookup("employeeid")
        .build()
}

/// All screens in display order.
pub fn all() -> Result<Vec<ResourceSchema>> {
    Ok(vec![categories()?, banners()?, users()?])
}
