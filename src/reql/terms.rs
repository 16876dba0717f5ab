//! ReQL term types and their wire protocol codes.
//!
//! This module defines the query operations the driver can emit as an enum.
//! The discriminant values match the ql2 wire protocol codes exactly so that
//! encoded queries interoperate with any RethinkDB-compatible server.
//!
//! # Term Categories
//!
//! - **Core Data**: DATUM, MAKE_ARRAY, MAKE_OBJ
//! - **Database Operations**: DB, DB_CREATE, DB_DROP, DB_LIST
//! - **Table Operations**: TABLE, TABLE_CREATE, TABLE_DROP, TABLE_LIST
//! - **Index Operations**: INDEX_CREATE, INDEX_DROP, INDEX_LIST, INDEX_WAIT
//! - **Data Access**: GET, GET_ALL, FILTER
//! - **Math & Logic**: ADD..MOD, EQ..GE, AND, OR, NOT
//! - **Geospatial**: GEOJSON, TO_GEOJSON, POINT, LINE, POLYGON, DISTANCE,
//!   INTERSECTS, INCLUDES, CIRCLE, GET_INTERSECTING, FILL, GET_NEAREST,
//!   POLYGON_SUB
//!
//! # Example
//!
//! ```rust,ignore
//! use photonql::reql::TermType;
//!
//! let term_type = TermType::from_u64(159).unwrap();
//! assert_eq!(term_type, TermType::Point);
//! assert_eq!(term_type.name(), "POINT");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u64)]
pub enum TermType {
    // Core data types
    Datum = 1,
    MakeArray = 2,
    MakeObj = 3,

    // Variables
    Var = 10,
    ImplicitVar = 13,

    // Database operations
    Db = 14,
    Table = 15,
    Get = 16,

    // Comparison operators
    Eq = 17,
    Ne = 18,
    Lt = 19,
    Le = 20,
    Gt = 21,
    Ge = 22,

    // Logic operators
    Not = 23,

    // Math operators
    Add = 24,
    Sub = 25,
    Mul = 26,
    Div = 27,
    Mod = 28,

    // Object operations
    GetField = 31,
    Pluck = 33,
    Without = 34,
    Merge = 35,

    // Transformations & aggregations
    Map = 38,
    Filter = 39,
    OrderBy = 41,
    Distinct = 42,
    Count = 43,
    Union = 44,
    Nth = 45,

    // Write operations
    Update = 53,
    Delete = 54,
    Replace = 55,
    Insert = 56,

    // Database admin
    DbCreate = 57,
    DbDrop = 58,
    DbList = 59,

    // Table admin
    TableCreate = 60,
    TableDrop = 61,
    TableList = 62,

    // Control flow
    Branch = 65,
    Or = 66,
    And = 67,
    ForEach = 68,
    Func = 69,

    // Sequence operations
    Skip = 70,
    Limit = 71,
    Asc = 73,
    Desc = 74,

    // Index admin
    IndexCreate = 75,
    IndexDrop = 76,
    IndexList = 77,
    GetAll = 78,
    IndexStatus = 139,
    IndexWait = 140,

    // Geospatial
    Geojson = 157,
    ToGeojson = 158,
    Point = 159,
    Line = 160,
    Polygon = 161,
    Distance = 162,
    Intersects = 163,
    Includes = 164,
    Circle = 165,
    GetIntersecting = 166,
    Fill = 167,
    GetNearest = 168,
    PolygonSub = 171,
}

impl TermType {
    /// Converts from a u64 wire protocol code.
    ///
    /// # Returns
    ///
    /// * `Some(TermType)` - If the value maps to a known term type
    /// * `None` - If the value is unknown/unsupported
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(TermType::Datum),
            2 => Some(TermType::MakeArray),
            3 => Some(TermType::MakeObj),
            10 => Some(TermType::Var),
            13 => Some(TermType::ImplicitVar),
            14 => Some(TermType::Db),
            15 => Some(TermType::Table),
            16 => Some(TermType::Get),
            17 => Some(TermType::Eq),
            18 => Some(TermType::Ne),
            19 => Some(TermType::Lt),
            20 => Some(TermType::Le),
            21 => Some(TermType::Gt),
            22 => Some(TermType::Ge),
            23 => Some(TermType::Not),
            24 => Some(TermType::Add),
            25 => Some(TermType::Sub),
            26 => Some(TermType::Mul),
            27 => Some(TermType::Div),
            28 => Some(TermType::Mod),
            31 => Some(TermType::GetField),
            33 => Some(TermType::Pluck),
            34 => Some(TermType::Without),
            35 => Some(TermType::Merge),
            38 => Some(TermType::Map),
            39 => Some(TermType::Filter),
            41 => Some(TermType::OrderBy),
            42 => Some(TermType::Distinct),
            43 => Some(TermType::Count),
            44 => Some(TermType::Union),
            45 => Some(TermType::Nth),
            53 => Some(TermType::Update),
            54 => Some(TermType::Delete),
            55 => Some(TermType::Replace),
            56 => Some(TermType::Insert),
            57 => Some(TermType::DbCreate),
            58 => Some(TermType::DbDrop),
            59 => Some(TermType::DbList),
            60 => Some(TermType::TableCreate),
            61 => Some(TermType::TableDrop),
            62 => Some(TermType::TableList),
            65 => Some(TermType::Branch),
            66 => Some(TermType::Or),
            67 => Some(TermType::And),
            68 => Some(TermType::ForEach),
            69 => Some(TermType::Func),
            70 => Some(TermType::Skip),
            71 => Some(TermType::Limit),
            73 => Some(TermType::Asc),
            74 => Some(TermType::Desc),
            75 => Some(TermType::IndexCreate),
            76 => Some(TermType::IndexDrop),
            77 => Some(TermType::IndexList),
            78 => Some(TermType::GetAll),
            139 => Some(TermType::IndexStatus),
            140 => Some(TermType::IndexWait),
            157 => Some(TermType::Geojson),
            158 => Some(TermType::ToGeojson),
            159 => Some(TermType::Point),
            160 => Some(TermType::Line),
            161 => Some(TermType::Polygon),
            162 => Some(TermType::Distance),
            163 => Some(TermType::Intersects),
            164 => Some(TermType::Includes),
            165 => Some(TermType::Circle),
            166 => Some(TermType::GetIntersecting),
            167 => Some(TermType::Fill),
            168 => Some(TermType::GetNearest),
            171 => Some(TermType::PolygonSub),
            _ => None,
        }
    }

    /// Converts to the u64 wire protocol code.
    pub fn to_u64(self) -> u64 {
        self as u64
    }

    /// Returns the term type name as a string constant.
    ///
    /// Useful for debugging, logging, and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TermType::Datum => "DATUM",
            TermType::MakeArray => "MAKE_ARRAY",
            TermType::MakeObj => "MAKE_OBJ",
            TermType::Var => "VAR",
            TermType::ImplicitVar => "IMPLICIT_VAR",
            TermType::Db => "DB",
            TermType::Table => "TABLE",
            TermType::Get => "GET",
            TermType::Eq => "EQ",
            TermType::Ne => "NE",
            TermType::Lt => "LT",
            TermType::Le => "LE",
            TermType::Gt => "GT",
            TermType::Ge => "GE",
            TermType::Not => "NOT",
            TermType::Add => "ADD",
            TermType::Sub => "SUB",
            TermType::Mul => "MUL",
            TermType::Div => "DIV",
            TermType::Mod => "MOD",
            TermType::GetField => "GET_FIELD",
            TermType::Pluck => "PLUCK",
            TermType::Without => "WITHOUT",
            TermType::Merge => "MERGE",
            TermType::Map => "MAP",
            TermType::Filter => "FILTER",
            TermType::OrderBy => "ORDER_BY",
            TermType::Distinct => "DISTINCT",
            TermType::Count => "COUNT",
            TermType::Union => "UNION",
            TermType::Nth => "NTH",
            TermType::Update => "UPDATE",
            TermType::Delete => "DELETE",
            TermType::Replace => "REPLACE",
            TermType::Insert => "INSERT",
            TermType::DbCreate => "DB_CREATE",
            TermType::DbDrop => "DB_DROP",
            TermType::DbList => "DB_LIST",
            TermType::TableCreate => "TABLE_CREATE",
            TermType::TableDrop => "TABLE_DROP",
            TermType::TableList => "TABLE_LIST",
            TermType::Branch => "BRANCH",
            TermType::Or => "OR",
            TermType::And => "AND",
            TermType::ForEach => "FOR_EACH",
            TermType::Func => "FUNC",
            TermType::Skip => "SKIP",
            TermType::Limit => "LIMIT",
            TermType::Asc => "ASC",
            TermType::Desc => "DESC",
            TermType::IndexCreate => "INDEX_CREATE",
            TermType::IndexDrop => "INDEX_DROP",
            TermType::IndexList => "INDEX_LIST",
            TermType::GetAll => "GET_ALL",
            TermType::IndexStatus => "INDEX_STATUS",
            TermType::IndexWait => "INDEX_WAIT",
            TermType::Geojson => "GEOJSON",
            TermType::ToGeojson => "TO_GEOJSON",
            TermType::Point => "POINT",
            TermType::Line => "LINE",
            TermType::Polygon => "POLYGON",
            TermType::Distance => "DISTANCE",
            TermType::Intersects => "INTERSECTS",
            TermType::Includes => "INCLUDES",
            TermType::Circle => "CIRCLE",
            TermType::GetIntersecting => "GET_INTERSECTING",
            TermType::Fill => "FILL",
            TermType::GetNearest => "GET_NEAREST",
            TermType::PolygonSub => "POLYGON_SUB",
        }
    }
}

impl std::fmt::Display for TermType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
