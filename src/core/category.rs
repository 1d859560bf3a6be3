//! Category business logic - Lookups and find-or-create for the category tree.
//!
//! Every function is generic over `ConnectionTrait` so the seeders can run them
//! inside a single database transaction. Inserting through the ORM returns the
//! generated id, which is all a dependent insert needs; nothing here commits.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Finds the first category with the given name, regardless of its parent.
///
/// Rows are ordered by id so repeated lookups return the same category when
/// a name appears more than once in the tree.
pub async fn find_category_by_name<C>(db: &C, name: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .filter(category::Column::Name.eq(name))
        .order_by_asc(category::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a subcategory by its name and parent id.
pub async fn find_subcategory<C>(
    db: &C,
    name: &str,
    parent_category_id: i32,
) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .filter(category::Column::Name.eq(name))
        .filter(category::Column::ParentCategoryId.eq(parent_category_id))
        .order_by_asc(category::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category, top-level when `parent_category_id` is None.
///
/// # Errors
/// Returns an error if the name is empty or whitespace-only, or the insert fails.
pub async fn create_category<C>(
    db: &C,
    name: &str,
    parent_category_id: Option<i32>,
) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let category = category::ActiveModel {
        name: Set(name.to_string()),
        parent_category_id: Set(parent_category_id),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Returns the category with this name, creating a top-level one if none exists.
///
/// The boolean is true when the category was created by this call.
pub async fn find_or_create_category<C>(db: &C, name: &str) -> Result<(category::Model, bool)>
where
    C: ConnectionTrait,
{
    match find_category_by_name(db, name).await? {
        Some(existing) => Ok((existing, false)),
        None => Ok((create_category(db, name, None).await?, true)),
    }
}

/// Returns the subcategory `(name, parent_category_id)`, creating it if absent.
///
/// The boolean is true when the subcategory was created by this call.
pub async fn find_or_create_subcategory<C>(
    db: &C,
    name: &str,
    parent_category_id: i32,
) -> Result<(category::Model, bool)>
where
    C: ConnectionTrait,
{
    match find_subcategory(db, name, parent_category_id).await? {
        Some(existing) => Ok((existing, false)),
        None => Ok((
            create_category(db, name, Some(parent_category_id)).await?,
            true,
        )),
    }
}

/// Retrieves every category ordered by id.
pub async fn get_all_categories<C>(db: &C) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the subcategories of a category, ordered by id.
#[cfg(test)]
pub async fn get_subcategories<C>(db: &C, parent_category_id: i32) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .filter(category::Column::ParentCategoryId.eq(parent_category_id))
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_category(&db, "   ", None).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        assert!(get_all_categories(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_or_create_category() -> Result<()> {
        let db = setup_test_db().await?;

        let (dining, created) = find_or_create_category(&db, "dining").await?;
        assert!(created);
        assert_eq!(dining.name, "dining");
        assert_eq!(dining.parent_category_id, None);

        let (again, created) = find_or_create_category(&db, "dining").await?;
        assert!(!created);
        assert_eq!(again.id, dining.id);

        assert_eq!(get_all_categories(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_subcategories_are_scoped_by_parent() -> Result<()> {
        let db = setup_test_db().await?;

        let (dining, _) = find_or_create_category(&db, "dining").await?;
        let (travel, _) = find_or_create_category(&db, "travel").await?;

        let (first, created) = find_or_create_subcategory(&db, "local", dining.id).await?;
        assert!(created);
        assert_eq!(first.parent_category_id, Some(dining.id));

        // Same name under a different parent is a different subcategory
        let (second, created) = find_or_create_subcategory(&db, "local", travel.id).await?;
        assert!(created);
        assert_ne!(first.id, second.id);

        let (again, created) = find_or_create_subcategory(&db, "local", dining.id).await?;
        assert!(!created);
        assert_eq!(again.id, first.id);

        assert_eq!(get_subcategories(&db, dining.id).await?.len(), 1);
        assert_eq!(get_subcategories(&db, travel.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_category_by_name_matches_any_level() -> Result<()> {
        let db = setup_test_db().await?;

        let (travel, _) = find_or_create_category(&db, "travel").await?;
        let (hotels, _) = find_or_create_subcategory(&db, "hotels", travel.id).await?;

        let found = find_category_by_name(&db, "hotels").await?.unwrap();
        assert_eq!(found.id, hotels.id);
        assert!(find_category_by_name(&db, "cruises").await?.is_none());
        Ok(())
    }
}
