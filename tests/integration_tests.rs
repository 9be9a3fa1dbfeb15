//! Integration tests for Cover Match
//!
//! These tests drive the full recognition pipeline, from raw cover text to
//! ranked books, against scripted and HTTP-mocked providers.

use cover_match::config::Config;
use cover_match::models::{BookRecord, BookRecordBuilder, CandidateSet};
use cover_match::recognition::planner::query_key;
use cover_match::recognition::{plan, rank, score, CandidateExtractor, CoverRecognizer};
use cover_match::sources::mock::make_book;
use cover_match::sources::{MockSource, Source};
use mockito::Matcher;
use std::collections::HashSet;
use std::sync::Arc;

/// OCR dumps collected from real covers, noise included
const SAMPLE_COVERS: &[&str] = &[
    "SLEEPING\nMURDER\nAgatha Christie",
    "by Hannah Jayne\nTHE ESCAPE",
    "A New York Times Bestseller\nAtomic Habits\nJames Clear",
    "THE\nCHILDREN\nOF\nRED\nPEAK\nCraig DiLouie\nwww.redhookbooks.com",
    "SURVIVE\nTHE\nNIGHT\nRiley Sager\nISBN 978-1-524-74508-1\n$16.99",
    "Book Lovers\nbook lovers\nEmily Henry\nEMILY HENRY",
    "THE MARQUISE OF O\nHeinrich von Kleist\nPENGUIN CLASSICS",
    "Harry Potter\nand the\nPhilosopher's Stone\nJ. K. Rowling",
    "Dune\nFrank Herbert\nDune Messiah\nChildren of Dune\nGod Emperor\nHeretics\nChapterhouse\nBrian Herbert\nKevin Anderson\nBill Ransom",
    "X\n!!\n@@@@\n12 34\n",
    "",
];

fn titles(books: &[BookRecord]) -> Vec<&str> {
    books.iter().map(|b| b.title.as_str()).collect()
}

#[tokio::test]
async fn test_sleeping_murder_end_to_end() {
    let source = Arc::new(
        MockSource::new()
            .with_response(
                "SLEEPING MURDER Agatha Christie",
                vec![
                    make_book("oe-1", "Murder on the Orient Express", "Agatha Christie"),
                    make_book("sm-1", "Sleeping Murder", "Agatha Christie"),
                ],
            )
            .with_response(
                "SLEEPING MURDER",
                vec![make_book("sm-2", "SLEEPING MURDER", "AGATHA CHRISTIE")],
            )
            .with_response(
                "Agatha Christie",
                vec![make_book("nn-1", "And Then There Were None", "Agatha Christie")],
            ),
    );
    let recognizer = CoverRecognizer::new(source.clone());

    let result = recognizer
        .recognize("SLEEPING\nMURDER\nAgatha Christie", 8)
        .await;

    assert_eq!(result.candidates.title_candidates[0], "SLEEPING MURDER");
    assert_eq!(result.candidates.author_candidates, vec!["Agatha Christie"]);
    assert_eq!(result.search_queries[0], "SLEEPING MURDER Agatha Christie");

    let ids: Vec<&str> = result.books.iter().map(|b| b.google_books_id.as_str()).collect();
    assert_eq!(ids, vec!["sm-1", "oe-1", "nn-1"]);
    assert_eq!(source.calls().len(), result.search_queries.len());
}

#[tokio::test]
async fn test_by_prefix_does_not_tag_following_line() {
    let recognizer = CoverRecognizer::new(Arc::new(MockSource::new()));
    let result = recognizer.recognize("by Hannah Jayne\nTHE ESCAPE", 8).await;

    assert_eq!(result.candidates.author_candidates, vec!["Hannah Jayne"]);
    assert!(!result
        .candidates
        .author_candidates
        .iter()
        .any(|a| a.eq_ignore_ascii_case("THE ESCAPE")));
    assert_eq!(
        result.search_queries,
        vec!["THE ESCAPE Hannah Jayne", "THE ESCAPE", "Hannah Jayne"]
    );
    assert!(result.books.is_empty());
}

#[tokio::test]
async fn test_blank_text_is_a_valid_no_match() {
    let source = Arc::new(MockSource::new());
    let recognizer = CoverRecognizer::new(source.clone());

    let result = recognizer.recognize(" \n\t\n", 8).await;
    assert!(result.candidates.is_empty());
    assert!(result.search_queries.is_empty());
    assert!(result.books.is_empty());
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_provider_failure_is_absorbed() {
    let source = MockSource::new()
        .with_failure("Atomic Habits James Clear")
        .with_failure("Atomic Habits")
        .with_response(
            "James Clear",
            vec![make_book("ah-1", "Atomic Habits", "James Clear")],
        );
    let recognizer = CoverRecognizer::new(Arc::new(source));

    let result = recognizer
        .recognize("A New York Times Bestseller\nAtomic Habits\nJames Clear", 8)
        .await;
    assert_eq!(titles(&result.books), vec!["Atomic Habits"]);
}

#[tokio::test]
async fn test_result_cap_applies_after_ranking() {
    let books: Vec<BookRecord> = (0..6)
        .map(|i| make_book(&format!("x-{}", i), &format!("Unrelated {}", i), "Someone Else"))
        .chain(std::iter::once(make_book("bl-1", "Book Lovers", "Emily Henry")))
        .collect();
    let source = MockSource::new().with_response("Book Lovers Emily Henry", books);
    let recognizer = CoverRecognizer::new(Arc::new(source));

    // Default per-query count is 5, so the perfect match at position 7 is never fetched
    let result = recognizer.recognize("Book Lovers\nEmily Henry", 2).await;
    assert_eq!(result.books.len(), 2);
    assert!(result.books.iter().all(|b| b.google_books_id.starts_with("x-")));
}

#[test]
fn test_extraction_properties_hold_for_sample_covers() {
    let extractor = CandidateExtractor::default();

    for text in SAMPLE_COVERS {
        let set = extractor.extract(text);
        assert!(set.title_candidates.len() <= 5, "too many titles for {:?}", text);
        assert!(set.author_candidates.len() <= 3, "too many authors for {:?}", text);

        let unique_titles: HashSet<String> =
            set.title_candidates.iter().map(|t| t.to_lowercase()).collect();
        assert_eq!(unique_titles.len(), set.title_candidates.len());
        let unique_authors: HashSet<String> =
            set.author_candidates.iter().map(|a| a.to_lowercase()).collect();
        assert_eq!(unique_authors.len(), set.author_candidates.len());

        assert_eq!(set, extractor.extract(text), "extract not idempotent for {:?}", text);

        for candidate in set.title_candidates.iter().chain(set.author_candidates.iter()) {
            let lower = candidate.to_lowercase();
            assert!(!lower.contains("new york times"));
            assert!(!lower.contains("bestseller"));
            assert!(!candidate.is_empty());
        }
    }
}

#[test]
fn test_plan_properties_hold_for_sample_covers() {
    let extractor = CandidateExtractor::default();

    for text in SAMPLE_COVERS {
        let queries = plan(&extractor.extract(text));
        assert!(queries.len() <= 6);
        assert!(queries.iter().all(|q| !q.trim().is_empty()));

        let keys: HashSet<String> = queries.iter().map(|q| query_key(q)).collect();
        assert_eq!(keys.len(), queries.len(), "duplicate queries for {:?}", text);
    }
}

#[test]
fn test_ranking_monotonicity() {
    let candidates =
        CandidateSet::new(vec!["Sleeping Murder".into()], vec!["Agatha Christie".into()]);
    let unrelated = BookRecordBuilder::new("u", "Atomic Habits", "James Clear").build();
    let target = BookRecordBuilder::new("t", "Sleeping Murder", "Agatha Christie").build();

    assert!(score(&target, &candidates) >= 180);
    assert_eq!(score(&unrelated, &candidates), 0);

    let ranked = rank(vec![unrelated, target], &candidates);
    assert_eq!(ranked[0].google_books_id, "t");
}

const ESCAPE_BODY: &str = r#"{
    "totalItems": 1,
    "items": [{
        "id": "esc-1",
        "volumeInfo": {
            "title": "The Escape",
            "authors": ["Hannah Jayne"],
            "publishedDate": "2017-01-03",
            "industryIdentifiers": [{"type": "ISBN_13", "identifier": "9781492629993"}]
        }
    }]
}"#;

const CAMP_BODY: &str = r#"{
    "totalItems": 1,
    "items": [{
        "id": "camp-1",
        "volumeInfo": {"title": "Escape from Camp 14", "authors": ["Blaine Harden"]}
    }]
}"#;

#[tokio::test]
async fn test_google_books_pipeline_against_mock_server() {
    let mut server = mockito::Server::new_async().await;

    let combined = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "THE ESCAPE Hannah Jayne".into()),
            Matcher::UrlEncoded("maxResults".into(), "5".into()),
            Matcher::UrlEncoded("printType".into(), "books".into()),
        ]))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let title_only = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::UrlEncoded("q".into(), "THE ESCAPE".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CAMP_BODY)
        .expect(1)
        .create_async()
        .await;
    let author_only = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::UrlEncoded("q".into(), "Hannah Jayne".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ESCAPE_BODY)
        .expect(1)
        .create_async()
        .await;

    let mut config = Config::default();
    config.google_books.api_key = Some("test-key".into());
    config.google_books.base_url = server.url();
    config.google_books.max_retries = 0;

    let source = config.google_books.build_source().unwrap();
    assert!(source.supports_isbn_lookup());
    let recognizer = config.recognizer(Arc::new(source));

    let result = recognizer.recognize("by Hannah Jayne\nTHE ESCAPE", 8).await;

    combined.assert_async().await;
    title_only.assert_async().await;
    author_only.assert_async().await;

    assert_eq!(titles(&result.books), vec!["The Escape", "Escape from Camp 14"]);
    assert_eq!(result.books[0].publish_year, Some(2017));
    assert_eq!(result.books[0].isbn, "9781492629993");
}

#[test]
fn test_recognition_result_serializes_camel_case() {
    let result = cover_match::RecognitionResult {
        candidates: CandidateSet::new(vec!["Dune".into()], vec!["Frank Herbert".into()]),
        search_queries: vec!["Dune Frank Herbert".into()],
        books: vec![BookRecordBuilder::new("d-1", "Dune", "Frank Herbert")
            .publish_year(1965)
            .build()],
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["candidates"]["titleCandidates"][0], "Dune");
    assert_eq!(json["candidates"]["authorCandidates"][0], "Frank Herbert");
    assert_eq!(json["searchQueries"][0], "Dune Frank Herbert");
    assert_eq!(json["books"][0]["googleBooksId"], "d-1");
    assert_eq!(json["books"][0]["publishYear"], 1965);
    assert!(json["books"][0].get("score").is_none());
}
