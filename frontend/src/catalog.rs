//! Catalog filter/sort engine.
//!
//! A pure function over the in-memory book list: predicate filter (search,
//! category, availability, all ANDed) followed by a stable sort. The input is
//! never mutated; the displayed list is recomputed from scratch on every
//! filter-state change rather than maintained incrementally.

use biblioteca_shared::Book;

/// Availability facet of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    All,
    /// `copies_available > 0`
    Available,
    /// every copy is out
    Loaned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Lexicographic ascending, case-insensitive.
    #[default]
    Title,
    /// Lexicographic ascending, case-insensitive.
    Author,
    /// Numeric descending (newest first).
    Year,
}

/// Ephemeral per-view filter state; reset on view mount, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_term: String,
    /// Exact match on the literature type; empty means no category filter.
    pub category: String,
    pub availability: Availability,
    pub sort_key: SortKey,
}

fn matches_search(book: &Book, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [
        &book.title,
        &book.author,
        &book.publisher,
        &book.literature_type,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

fn matches_category(book: &Book, category: &str) -> bool {
    category.is_empty() || book.literature_type == category
}

fn matches_availability(book: &Book, availability: Availability) -> bool {
    match availability {
        Availability::All => true,
        Availability::Available => book.copies_available > 0,
        Availability::Loaned => book.copies_available == 0,
    }
}

/// Derives the displayed list from the fetched one.
///
/// Ties under the sort key keep their prior relative order (`sort_by` is
/// stable), so the result is deterministic for equal keys.
pub fn apply(books: &[Book], filters: &FilterState) -> Vec<Book> {
    let mut result: Vec<Book> = books
        .iter()
        .filter(|book| {
            matches_search(book, &filters.search_term)
                && matches_category(book, &filters.category)
                && matches_availability(book, filters.availability)
        })
        .cloned()
        .collect();

    match filters.sort_key {
        SortKey::Title => result.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortKey::Author => {
            result.sort_by(|a, b| a.author.to_lowercase().cmp(&b.author.to_lowercase()))
        }
        SortKey::Year => result.sort_by(|a, b| b.year.cmp(&a.year)),
    }
    result
}

/// Whether the request-loan action is offered for a book. The check repeats
/// in the action handler so a stale rendering cannot submit a request.
pub fn can_request(book: &Book) -> bool {
    book.copies_available > 0 && !book.deleted
}

/// Distinct literature types present in the list, for the category selector.
pub fn categories(books: &[Book]) -> Vec<String> {
    let mut cats: Vec<String> = books.iter().map(|b| b.literature_type.clone()).collect();
    cats.sort();
    cats.dedup();
    cats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str, year: i32, copies: u32) -> Book {
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            year,
            publisher: "Editorial".into(),
            literature_type: "Novela".into(),
            copies_available: copies,
            photo_url: None,
            deleted: false,
        }
    }

    fn sample() -> Vec<Book> {
        vec![
            book("1", "Zorro", "A", 2000, 0),
            book("2", "Alma", "B", 2010, 2),
        ]
    }

    #[test]
    fn availability_filter_excludes_zero_copy_books() {
        let filters = FilterState {
            availability: Availability::Available,
            ..Default::default()
        };
        let result = apply(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Alma");
    }

    #[test]
    fn year_sort_is_descending_over_all_books() {
        let filters = FilterState {
            sort_key: SortKey::Year,
            ..Default::default()
        };
        let result = apply(&sample(), &filters);
        let titles: Vec<&str> = result.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Alma", "Zorro"]);
        assert!(result.windows(2).all(|w| w[0].year >= w[1].year));
    }

    #[test]
    fn apply_is_idempotent() {
        let filters = FilterState {
            search_term: "o".into(),
            sort_key: SortKey::Author,
            ..Default::default()
        };
        let once = apply(&sample(), &filters);
        let twice = apply(&once, &filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn result_is_a_subset_and_input_is_untouched() {
        let books = sample();
        let filters = FilterState {
            search_term: "zorro".into(),
            ..Default::default()
        };
        let result = apply(&books, &filters);
        assert!(result.len() <= books.len());
        assert!(result.iter().all(|b| books.contains(b)));
        // No mutation of the input sequence.
        assert_eq!(books, sample());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut books = sample();
        books[0].publisher = "Alfaguara".into();
        books[1].literature_type = "Poesía".into();

        let by_publisher = apply(
            &books,
            &FilterState {
                search_term: "ALFAGUARA".into(),
                ..Default::default()
            },
        );
        assert_eq!(by_publisher.len(), 1);
        assert_eq!(by_publisher[0].title, "Zorro");

        let by_type = apply(
            &books,
            &FilterState {
                search_term: "poesía".into(),
                ..Default::default()
            },
        );
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].title, "Alma");
    }

    #[test]
    fn empty_search_matches_everything() {
        let result = apply(&sample(), &FilterState::default());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn category_filter_is_exact() {
        let mut books = sample();
        books[1].literature_type = "Ensayo".into();
        let filters = FilterState {
            category: "Novela".into(),
            ..Default::default()
        };
        let result = apply(&books, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Zorro");

        // "Nov" is not a category, even though it is a prefix.
        let prefix = FilterState {
            category: "Nov".into(),
            ..Default::default()
        };
        assert!(apply(&books, &prefix).is_empty());
    }

    #[test]
    fn title_sort_is_non_decreasing_and_case_insensitive() {
        let books = vec![
            book("1", "zorro", "A", 2000, 1),
            book("2", "Alma", "B", 2010, 1),
            book("3", "ALMA", "C", 1990, 1),
        ];
        let result = apply(
            &books,
            &FilterState {
                sort_key: SortKey::Title,
                ..Default::default()
            },
        );
        let titles: Vec<&str> = result.iter().map(|b| b.title.as_str()).collect();
        // Equal keys ("Alma"/"ALMA") keep their input order: stable sort.
        assert_eq!(titles, vec!["Alma", "ALMA", "zorro"]);
    }

    #[test]
    fn equal_years_preserve_prior_relative_order() {
        let books = vec![
            book("1", "Primero", "X", 2005, 1),
            book("2", "Segundo", "Y", 2005, 1),
            book("3", "Tercero", "Z", 2020, 1),
        ];
        let result = apply(
            &books,
            &FilterState {
                sort_key: SortKey::Year,
                ..Default::default()
            },
        );
        let ids: Vec<&str> = result.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn loaned_filter_keeps_only_exhausted_books() {
        let filters = FilterState {
            availability: Availability::Loaned,
            ..Default::default()
        };
        let result = apply(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Zorro");
    }

    #[test]
    fn request_requires_copies_and_a_live_record() {
        let available = book("1", "Alma", "B", 2010, 2);
        assert!(can_request(&available));

        let exhausted = book("2", "Zorro", "A", 2000, 0);
        assert!(!can_request(&exhausted));

        let mut deleted = book("3", "Otro", "C", 1999, 5);
        deleted.deleted = true;
        assert!(!can_request(&deleted));
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let mut books = sample();
        books.push(book("3", "Otro", "C", 1999, 1));
        books[0].literature_type = "Ensayo".into();
        let cats = categories(&books);
        assert_eq!(cats, vec!["Ensayo".to_string(), "Novela".to_string()]);
    }
}
