//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the products table.

/// Column list used by every statement that returns rows. `price` comes back
/// as `::text` so sqlx returns the NUMERIC as a string.
pub const PRODUCT_COLUMNS: &str = "id, name, price::text AS price, created_at";

const TABLE: &str = "products";

/// Fields the `ordering` query parameter may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderField {
    CreatedAt,
    Price,
    Name,
}

impl OrderField {
    fn column(self) -> &'static str {
        match self {
            OrderField::CreatedAt => "created_at",
            OrderField::Price => "price",
            OrderField::Name => "name",
        }
    }
}

/// Parsed `ordering` parameter: field plus direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ordering {
    pub field: OrderField,
    pub descending: bool,
}

impl Default for Ordering {
    /// Newest first.
    fn default() -> Self {
        Ordering {
            field: OrderField::CreatedAt,
            descending: true,
        }
    }
}

impl Ordering {
    /// Parse `price`, `-created_at`, `name`, etc. Unknown fields yield None;
    /// callers fall back to the default, as the ordering filter in the
    /// original API does.
    pub fn parse(s: &str) -> Option<Self> {
        let (descending, field) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let field = match field {
            "created_at" => OrderField::CreatedAt,
            "price" => OrderField::Price,
            "name" => OrderField::Name,
            _ => return None,
        };
        Some(Ordering { field, descending })
    }

    fn sql(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        // id tiebreak keeps pages stable when the order key repeats.
        format!("{} {}, id {}", self.field.column(), dir, dir)
    }
}

/// Exact-match filters from query parameters.
#[derive(Clone, Debug, Default)]
pub struct Filters {
    pub name: Option<String>,
    pub price: Option<String>,
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: String) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn where_clause(q: &mut QueryBuf, filters: &Filters) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &filters.name {
        let n = q.push_param(name.clone());
        parts.push(format!("name = ${}", n));
    }
    if let Some(price) = &filters.price {
        let n = q.push_param(price.clone());
        parts.push(format!("price = ${}::numeric", n));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// SELECT page of products with filters, ordering, LIMIT/OFFSET.
pub fn select_list(filters: &Filters, ordering: Ordering, limit: u32, offset: u64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, filters);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        PRODUCT_COLUMNS,
        TABLE,
        where_sql,
        ordering.sql(),
        limit,
        offset
    );
    q
}

/// COUNT matching the same filters as `select_list`.
pub fn count(filters: &Filters) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, filters);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", TABLE, where_sql);
    q
}

/// SELECT one product by primary key. Caller binds id as sole param.
pub fn select_by_id() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", PRODUCT_COLUMNS, TABLE)
}

/// INSERT name and price; id and created_at come from the database.
pub fn insert() -> String {
    format!(
        "INSERT INTO {} (name, price) VALUES ($1, $2::numeric) RETURNING {}",
        TABLE, PRODUCT_COLUMNS
    )
}

/// Full UPDATE by id: both writable columns are set.
pub fn update() -> String {
    format!(
        "UPDATE {} SET name = $1, price = $2::numeric WHERE id = $3 RETURNING {}",
        TABLE, PRODUCT_COLUMNS
    )
}

/// Partial UPDATE by id: SET only the supplied columns, id bound last.
/// None when nothing is supplied; callers re-read the row instead.
pub fn update_partial(name: Option<&str>, price: Option<&str>) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = name {
        let n = q.push_param(name.to_string());
        sets.push(format!("name = ${}", n));
    }
    if let Some(price) = price {
        let n = q.push_param(price.to_string());
        sets.push(format!("price = ${}::numeric", n));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.params.len() + 1;
    q.sql = format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        TABLE,
        sets.join(", "),
        id_param,
        PRODUCT_COLUMNS
    );
    Some(q)
}

/// DELETE by id, returning the primary key so callers can tell a miss apart.
pub fn delete() -> String {
    format!("DELETE FROM {} WHERE id = $1 RETURNING id", TABLE)
}
