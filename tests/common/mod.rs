#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::net::TcpListener;

use catalog_api::config::SecurityConfig;
use catalog_api::database::catalog::{
    author_assignments, book_assignments, AUTHORS, BOOKS, BOOKS_EXTENDED, GENRES, LANGUAGES,
};
use catalog_api::database::models::{
    Author, AuthorPatch, Book, BookExt, BookListing, BookPatch, BookView, Genre, Language,
};
use catalog_api::database::{
    AuthorStore, BookStore, CatalogStore, DatabaseError, GenreStore, LanguageStore,
};
use catalog_api::filter::{
    ClauseValue, Filter, FilterClause, FilterOp, QueryParams, ResourceDescriptor, SortDirection,
    SqlValue,
};
use catalog_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";

/// An id no seeded table contains
pub const MISSING_ID: i64 = 999;

pub fn security() -> SecurityConfig {
    SecurityConfig {
        secret: SECRET.to_string(),
        token_ttl_minutes: 30,
    }
}

/// Router served on an ephemeral local port, backed by a seeded [`MockCatalog`]
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MockCatalog>,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let store = Arc::new(MockCatalog::seeded());
        let state = AppState::new(store.clone(), &security()).context("building app state")?;

        let listener = TcpListener::bind("127.0.0.1:0").await.context("binding test listener")?;
        let addr = listener.local_addr()?;
        let router = app(state.clone());
        tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self {
            base_url: format!("http://{addr}"),
            store,
            state,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn admin_token(&self) -> String {
        self.state.issuer.issue(true).expect("issue admin token")
    }

    pub fn reader_token(&self) -> String {
        self.state.issuer.issue(false).expect("issue reader token")
    }

    pub fn get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }
}

#[derive(Default)]
struct Tables {
    books: BTreeMap<i64, Book>,
    authors: BTreeMap<i64, Author>,
    genres: BTreeMap<i64, Genre>,
    languages: BTreeMap<i64, Language>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_references(&self, book: &Book) -> Result<(), DatabaseError> {
        if self.authors.contains_key(&book.author)
            && self.genres.contains_key(&book.genre)
            && self.languages.contains_key(&book.language)
        {
            Ok(())
        } else {
            Err(DatabaseError::ForeignKeyViolation)
        }
    }

    fn extend(&self, book: &Book) -> Option<BookExt> {
        Some(BookExt {
            id: book.id,
            title: book.title.clone(),
            year: book.year,
            pages: book.pages,
            author: self.authors.get(&book.author)?.clone(),
            genre: self.genres.get(&book.genre)?.clone(),
            language: self.languages.get(&book.language)?.clone(),
        })
    }
}

/// In-memory store with the same error behaviour as the Postgres one:
/// dangling references and deletes of referenced rows are foreign key
/// violations, unknown ids are not found.
#[derive(Default)]
pub struct MockCatalog {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MockCatalog {
    pub fn seeded() -> Self {
        let mut t = Tables::default();
        for (first, last, born, died) in [
            ("Frank", "Herbert", 1920, Some(1986)),
            ("Ursula", "Le Guin", 1929, Some(2018)),
            ("Nancy", "Kress", 1948, None),
        ] {
            let id = t.next_id();
            t.authors.insert(id, Author {
                id,
                first_name: first.into(),
                last_name: last.into(),
                birth_year: born,
                death_year: died,
            });
        }
        for name in ["Fantasy", "Science Fiction"] {
            let id = t.next_id();
            t.genres.insert(id, Genre { id, name: name.into() });
        }
        for name in ["English", "Polish"] {
            let id = t.next_id();
            t.languages.insert(id, Language { id, name: name.into() });
        }
        // authors 1..=3, genres 4..=5, languages 6..=7
        for (title, year, pages, author, genre) in [
            ("Dune", 1965, 412, 1, 5),
            ("A Wizard of Earthsea", 1968, 183, 2, 4),
            ("The Left Hand of Darkness", 1969, 286, 2, 5),
            ("Dune Messiah", 1969, 256, 1, 5),
            ("Beggars in Spain", 1993, 438, 3, 5),
        ] {
            let id = t.next_id();
            t.books.insert(id, Book { id, title: title.into(), year, pages, author, genre, language: 6 });
        }

        Self { tables: Mutex::new(t), unavailable: AtomicBool::new(false) }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("mock catalog lock poisoned")
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    pub fn book(&self, id: i64) -> Option<Book> {
        self.tables().books.get(&id).cloned()
    }

    pub fn author(&self, id: i64) -> Option<Author> {
        self.tables().authors.get(&id).cloned()
    }

    pub fn book_ids_by_title(&self, title: &str) -> Vec<i64> {
        self.tables().books.values().filter(|b| b.title == title).map(|b| b.id).collect()
    }
}

type Row = Vec<(&'static str, SqlValue)>;

fn book_row(b: &Book) -> Row {
    vec![
        ("id", b.id.into()),
        ("title", b.title.as_str().into()),
        ("publication_year", b.year.into()),
        ("page_count", b.pages.into()),
        ("author_id", b.author.into()),
        ("genre_id", b.genre.into()),
        ("language_id", b.language.into()),
    ]
}

fn book_ext_row(b: &BookExt) -> Row {
    vec![
        ("b.id", b.id.into()),
        ("b.title", b.title.as_str().into()),
        ("b.publication_year", b.year.into()),
        ("b.page_count", b.pages.into()),
        ("a.id", b.author.id.into()),
        ("a.first_name", b.author.first_name.as_str().into()),
        ("a.last_name", b.author.last_name.as_str().into()),
        ("a.birth_year", b.author.birth_year.into()),
        ("a.death_year", b.author.death_year.into()),
        ("g.id", b.genre.id.into()),
        ("g.name", b.genre.name.as_str().into()),
        ("l.id", b.language.id.into()),
        ("l.name", b.language.name.as_str().into()),
    ]
}

fn author_row(a: &Author) -> Row {
    vec![
        ("id", a.id.into()),
        ("first_name", a.first_name.as_str().into()),
        ("last_name", a.last_name.as_str().into()),
        ("birth_year", a.birth_year.into()),
        ("death_year", a.death_year.into()),
    ]
}

fn named_row(id: i64, name: &str) -> Row {
    vec![("id", id.into()), ("name", name.into())]
}

fn lookup<'r>(row: &'r Row, column: &str) -> &'r SqlValue {
    row.iter()
        .find(|(c, _)| *c == column)
        .map(|(_, v)| v)
        .unwrap_or_else(|| panic!("mock row has no column {column}"))
}

fn compare(a: &SqlValue, b: &SqlValue) -> Option<Ordering> {
    match (a, b) {
        (SqlValue::Integer(x), SqlValue::Integer(y)) => Some(x.cmp(y)),
        (SqlValue::Text(x), SqlValue::Text(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn matches(row: &Row, clause: &FilterClause) -> bool {
    let value = lookup(row, clause.column);
    match &clause.value {
        ClauseValue::Null if clause.op == FilterOp::Eq => matches!(value, SqlValue::Null(_)),
        ClauseValue::Null => !matches!(value, SqlValue::Null(_)),
        ClauseValue::Bound(bound) => match compare(value, bound) {
            None => false,
            Some(ord) => match clause.op {
                FilterOp::Eq => ord == Ordering::Equal,
                FilterOp::Neq => ord != Ordering::Equal,
                FilterOp::Gt => ord == Ordering::Greater,
                FilterOp::Gte => ord != Ordering::Less,
                FilterOp::Lt => ord == Ordering::Less,
                FilterOp::Lte => ord != Ordering::Greater,
            },
        },
    }
}

/// Evaluate the compiled filter in memory: where, then sort, then page
fn select<T>(
    items: Vec<T>,
    resource: &ResourceDescriptor,
    params: &QueryParams,
    to_row: impl Fn(&T) -> Row,
) -> Result<Vec<T>, DatabaseError> {
    let mut filter = Filter::new(resource);
    filter.assign(params)?;

    let mut rows: Vec<(Row, T)> = items
        .into_iter()
        .map(|item| (to_row(&item), item))
        .filter(|(row, _)| filter.clauses().iter().all(|c| matches(row, c)))
        .collect();

    if let Some(sort) = filter.sort() {
        rows.sort_by(|(a, _), (b, _)| {
            let ord = compare(lookup(a, sort.column), lookup(b, sort.column)).unwrap_or(Ordering::Equal);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    let page = filter.paging();
    let rest = rows.into_iter().map(|(_, item)| item).skip(page.offset.unwrap_or(0) as usize);
    Ok(match page.limit {
        Some(limit) => rest.take(limit as usize).collect(),
        None => rest.collect(),
    })
}

fn text(v: &SqlValue) -> String {
    match v {
        SqlValue::Text(s) => s.clone(),
        other => panic!("expected text, got {other:?}"),
    }
}

fn int(v: &SqlValue) -> i64 {
    match v {
        SqlValue::Integer(i) => *i,
        other => panic!("expected integer, got {other:?}"),
    }
}

#[async_trait]
impl BookStore for MockCatalog {
    async fn list_books(&self, params: &QueryParams, view: BookView) -> Result<BookListing, DatabaseError> {
        let t = self.tables();
        let books: Vec<Book> = t.books.values().cloned().collect();
        match view {
            BookView::Plain => select(books, &BOOKS, params, book_row).map(BookListing::Plain),
            BookView::Extended => {
                let extended = books.iter().filter_map(|b| t.extend(b)).collect();
                select(extended, &BOOKS_EXTENDED, params, book_ext_row).map(BookListing::Extended)
            }
        }
    }

    async fn get_book(&self, id: i64) -> Result<Book, DatabaseError> {
        self.tables().books.get(&id).cloned().ok_or(DatabaseError::NotFound(id))
    }

    async fn insert_book(&self, book: &Book) -> Result<i64, DatabaseError> {
        let mut t = self.tables();
        t.check_references(book)?;
        let id = t.next_id();
        t.books.insert(id, Book { id, ..book.clone() });
        Ok(id)
    }

    async fn replace_book(&self, id: i64, book: &Book) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        t.check_references(book)?;
        let slot = t.books.get_mut(&id).ok_or(DatabaseError::NotFound(id))?;
        *slot = Book { id, ..book.clone() };
        Ok(())
    }

    async fn patch_book(&self, id: i64, patch: &BookPatch) -> Result<(), DatabaseError> {
        let assignments = book_assignments(patch);
        if assignments.is_empty() {
            return Err(DatabaseError::NoColumnsToUpdate);
        }

        let mut t = self.tables();
        let mut book = t.books.get(&id).cloned().ok_or(DatabaseError::NotFound(id))?;
        for (column, value) in assignments.iter() {
            match column {
                "title" => book.title = text(value),
                "publication_year" => book.year = int(value),
                "page_count" => book.pages = int(value),
                "author_id" => book.author = int(value),
                "genre_id" => book.genre = int(value),
                "language_id" => book.language = int(value),
                other => panic!("unexpected book column {other}"),
            }
        }
        t.check_references(&book)?;
        t.books.insert(id, book);
        Ok(())
    }

    async fn delete_book(&self, id: i64) -> Result<(), DatabaseError> {
        self.tables().books.remove(&id).map(|_| ()).ok_or(DatabaseError::NotFound(id))
    }
}

#[async_trait]
impl AuthorStore for MockCatalog {
    async fn list_authors(&self, params: &QueryParams) -> Result<Vec<Author>, DatabaseError> {
        let authors = self.tables().authors.values().cloned().collect();
        select(authors, &AUTHORS, params, author_row)
    }

    async fn get_author(&self, id: i64) -> Result<Author, DatabaseError> {
        self.tables().authors.get(&id).cloned().ok_or(DatabaseError::NotFound(id))
    }

    async fn insert_author(&self, author: &Author) -> Result<i64, DatabaseError> {
        let mut t = self.tables();
        let id = t.next_id();
        t.authors.insert(id, Author { id, ..author.clone() });
        Ok(id)
    }

    async fn replace_author(&self, id: i64, author: &Author) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        let slot = t.authors.get_mut(&id).ok_or(DatabaseError::NotFound(id))?;
        *slot = Author { id, ..author.clone() };
        Ok(())
    }

    async fn patch_author(&self, id: i64, patch: &AuthorPatch) -> Result<(), DatabaseError> {
        let assignments = author_assignments(patch);
        if assignments.is_empty() {
            return Err(DatabaseError::NoColumnsToUpdate);
        }

        let mut t = self.tables();
        let author = t.authors.get_mut(&id).ok_or(DatabaseError::NotFound(id))?;
        for (column, value) in assignments.iter() {
            match column {
                "first_name" => author.first_name = text(value),
                "last_name" => author.last_name = text(value),
                "birth_year" => author.birth_year = int(value),
                "death_year" => author.death_year = Some(int(value)),
                other => panic!("unexpected author column {other}"),
            }
        }
        Ok(())
    }

    async fn delete_author(&self, id: i64) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        if t.books.values().any(|b| b.author == id) {
            return Err(DatabaseError::ForeignKeyViolation);
        }
        t.authors.remove(&id).map(|_| ()).ok_or(DatabaseError::NotFound(id))
    }
}

#[async_trait]
impl GenreStore for MockCatalog {
    async fn list_genres(&self, params: &QueryParams) -> Result<Vec<Genre>, DatabaseError> {
        let genres = self.tables().genres.values().cloned().collect();
        select(genres, &GENRES, params, |g: &Genre| named_row(g.id, &g.name))
    }

    async fn get_genre(&self, id: i64) -> Result<Genre, DatabaseError> {
        self.tables().genres.get(&id).cloned().ok_or(DatabaseError::NotFound(id))
    }

    async fn insert_genre(&self, genre: &Genre) -> Result<i64, DatabaseError> {
        let mut t = self.tables();
        let id = t.next_id();
        t.genres.insert(id, Genre { id, name: genre.name.clone() });
        Ok(id)
    }

    async fn replace_genre(&self, id: i64, genre: &Genre) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        let slot = t.genres.get_mut(&id).ok_or(DatabaseError::NotFound(id))?;
        slot.name = genre.name.clone();
        Ok(())
    }

    async fn delete_genre(&self, id: i64) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        if t.books.values().any(|b| b.genre == id) {
            return Err(DatabaseError::ForeignKeyViolation);
        }
        t.genres.remove(&id).map(|_| ()).ok_or(DatabaseError::NotFound(id))
    }
}

#[async_trait]
impl LanguageStore for MockCatalog {
    async fn list_languages(&self, params: &QueryParams) -> Result<Vec<Language>, DatabaseError> {
        let languages = self.tables().languages.values().cloned().collect();
        select(languages, &LANGUAGES, params, |l: &Language| named_row(l.id, &l.name))
    }

    async fn get_language(&self, id: i64) -> Result<Language, DatabaseError> {
        self.tables().languages.get(&id).cloned().ok_or(DatabaseError::NotFound(id))
    }

    async fn insert_language(&self, language: &Language) -> Result<i64, DatabaseError> {
        let mut t = self.tables();
        let id = t.next_id();
        t.languages.insert(id, Language { id, name: language.name.clone() });
        Ok(id)
    }

    async fn replace_language(&self, id: i64, language: &Language) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        let slot = t.languages.get_mut(&id).ok_or(DatabaseError::NotFound(id))?;
        slot.name = language.name.clone();
        Ok(())
    }

    async fn delete_language(&self, id: i64) -> Result<(), DatabaseError> {
        let mut t = self.tables();
        if t.books.values().any(|b| b.language == id) {
            return Err(DatabaseError::ForeignKeyViolation);
        }
        t.languages.remove(&id).map(|_| ()).ok_or(DatabaseError::NotFound(id))
    }
}

#[async_trait]
impl CatalogStore for MockCatalog {
    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(DatabaseError::Query {
                context: "mock store unavailable",
                source: sqlx::Error::PoolClosed,
            });
        }
        Ok(())
    }
}
