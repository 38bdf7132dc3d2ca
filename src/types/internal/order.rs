/// An order together with the products on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub oid: i64,
    pub uid: i64,
    pub products: Vec<i64>,
}
