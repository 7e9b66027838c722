use std::collections::BTreeMap;

/// A two-way lookup table. Rows and columns are kept ordered, so every walk over the table
/// visits entries in ascending (row, column) order.
#[derive(Clone, Debug)]
pub struct Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    map: BTreeMap<T, BTreeMap<U, V>>,
}

impl<T, U, V> Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    /// Create an empty table.
    #[inline]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Set the value in the table with the given keys.
    #[inline]
    pub fn set(&mut self, row: T, col: U, val: V) -> Option<V> {
        self.map.entry(row).or_insert_with(BTreeMap::new).insert(col, val)
    }

    /// Set the value in the table with the given keys, or if some value already exists for those
    /// keys, execute the given callback.
    #[inline]
    pub fn set_or<F>(&mut self, row: T, col: U, val: V, or: F)
    where
        F: FnOnce(&mut V),
    {
        match self.get_mut(&row, &col) {
            Some(v) => or(v),
            None => {
                self.set(row, col, val);
            }
        };
    }

    /// Retrieve a mutable reference to the value in the table with the given keys.
    #[inline]
    pub fn get_mut(&mut self, row: &T, col: &U) -> Option<&mut V> {
        self.map.get_mut(row).and_then(|c| c.get_mut(col))
    }

    /// Retrieve an immutable reference to the value in the table with the given keys.
    #[inline]
    pub fn get(&self, row: &T, col: &U) -> Option<&V> {
        self.map.get(row).and_then(|c| c.get(col))
    }

    /// Iterate over one row of values in column order. Missing rows are empty.
    #[inline]
    pub fn get_row(&self, row: &T) -> impl Iterator<Item = (&'_ U, &'_ V)> + '_ {
        self.map.get(row).into_iter().flat_map(|c| c.iter())
    }
}

impl<T, U, V> Default for Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> IntoIterator for &'a Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    type Item = (&'a T, &'a U, &'a V);
    type IntoIter = TableIterator<&'a T, &'a U, &'a V>;

    /// Produce an iterator on all the values in the table. See [TableIterator].
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let vec: Vec<(&'a T, &'a U, &'a V)> = self
            .map
            .iter()
            .flat_map(|(row, c)| c.iter().map(move |(col, val)| (row, col, val)))
            .collect();
        TableIterator(vec.into_iter())
    }
}

/// An iterator on the the values stored in the table. Each item is a tuple consisting of each
/// set of keys and value.
pub struct TableIterator<T, U, V>(std::vec::IntoIter<(T, U, V)>);

impl<T, U, V> Iterator for TableIterator<T, U, V> {
    type Item = (T, U, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
