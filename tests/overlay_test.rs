//! Tests for LocaleOverlay

use std::sync::Arc;

use rstest::rstest;

use rscat::application::{LocaleOverlay, OverlayMode};
use rscat::domain::Category;
use rscat::infrastructure::traits::InMemoryCategoryStore;

/// Helper to build a default-locale record
fn cat(id: u64) -> Category {
    Category {
        id,
        title: format!("cat-{id}"),
        ..Category::default()
    }
}

/// Helper to build a locale variant of `locale_parent`
fn variant(id: u64, locale: u64, locale_parent: u64) -> Category {
    Category {
        id,
        locale,
        locale_parent,
        title: format!("cat-{id}-l{locale}"),
        ..Category::default()
    }
}

fn overlay_over(records: Vec<Category>, mode: OverlayMode) -> LocaleOverlay {
    LocaleOverlay::new(Arc::new(InMemoryCategoryStore::new(records)), mode)
}

#[test]
fn given_default_locale_when_applying_then_returns_input_unchanged() {
    // Arrange - a variant exists, but locale 0 must not consult it
    let overlay = overlay_over(
        vec![cat(7), variant(70, 2, 7)],
        OverlayMode::FirstOccurrence,
    );

    // Act
    let resolved = overlay.apply(&[7, 8], 0).unwrap();

    // Assert
    assert_eq!(resolved, vec![7, 8]);
}

#[test]
fn given_variant_when_applying_then_substitutes_variant_id() {
    // Arrange
    let overlay = overlay_over(
        vec![cat(7), cat(8), variant(70, 2, 7)],
        OverlayMode::FirstOccurrence,
    );

    // Act
    let resolved = overlay.apply(&[7, 8], 2).unwrap();

    // Assert - 7 is rewritten, 8 passes through
    assert_eq!(resolved, vec![70, 8]);
}

#[test]
fn given_id_without_variant_when_applying_then_passes_through() {
    // Arrange - variant belongs to another locale
    let overlay = overlay_over(vec![cat(7), variant(70, 3, 7)], OverlayMode::FirstOccurrence);

    // Act
    let resolved = overlay.apply(&[7], 2).unwrap();

    // Assert
    assert_eq!(resolved, vec![7]);
}

#[rstest]
#[case(OverlayMode::FirstOccurrence, vec![70, 7, 8])]
#[case(OverlayMode::AllOccurrences, vec![70, 70, 8])]
fn given_duplicate_ids_when_applying_then_mode_decides_substitution(
    #[case] mode: OverlayMode,
    #[case] expected: Vec<u64>,
) {
    // Arrange - the input list carries 7 twice
    let overlay = overlay_over(vec![cat(7), cat(8), variant(70, 2, 7)], mode);

    // Act
    let resolved = overlay.apply(&[7, 7, 8], 2).unwrap();

    // Assert
    assert_eq!(resolved, expected);
}

#[test]
fn given_several_variants_when_applying_then_order_and_length_are_preserved() {
    // Arrange
    let overlay = overlay_over(
        vec![
            cat(1),
            cat(2),
            cat(3),
            variant(10, 2, 1),
            variant(30, 2, 3),
        ],
        OverlayMode::FirstOccurrence,
    );

    // Act
    let resolved = overlay.apply(&[3, 2, 1], 2).unwrap();

    // Assert - each id keeps its slot
    assert_eq!(resolved, vec![30, 2, 10]);
}

#[test]
fn given_empty_list_when_applying_then_returns_empty() {
    // Arrange
    let overlay = overlay_over(vec![cat(1)], OverlayMode::FirstOccurrence);

    // Act
    let resolved = overlay.apply(&[], 2).unwrap();

    // Assert
    assert!(resolved.is_empty());
}
