/// Tabular view engine: fixed-size pagination over an arbitrary record set
///
/// The view operates on whatever sequence it is given, in the order given;
/// sorting and filtering happen before the records arrive here. Column
/// descriptors are carried for the renderer but never interpreted by the
/// view itself.

use thiserror::Error;

/// Number of records per page when the caller does not choose one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors that can occur when configuring a table view
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}

/// A column descriptor pairing a header with a cell renderer
///
/// The view engine stores these opaquely; extracting a display value from a
/// record is the renderer's job, done by calling [`Column::cell`].
pub struct Column<T> {
    pub header: String,
    render: Box<dyn Fn(&T) -> String>,
}

impl<T> Column<T> {
    pub fn new(header: impl Into<String>, render: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            header: header.into(),
            render: Box::new(render),
        }
    }

    /// Render the cell value for one record
    pub fn cell(&self, record: &T) -> String {
        (self.render)(record)
    }
}

/// Paginated view over a record sequence
///
/// Holds a single `page_index` ranging over `[0, page_count - 1]`, starting
/// at 0. Replacing the records or the page size resets the index, since a
/// page position into different data is meaningless.
pub struct TableView<T, C = Column<T>> {
    records: Vec<T>,
    columns: Vec<C>,
    page_size: usize,
    page_index: usize,
}

impl<T, C> TableView<T, C> {
    /// Create a view with the default page size
    pub fn new(records: Vec<T>, columns: Vec<C>) -> Self {
        Self {
            records,
            columns,
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 0,
        }
    }

    /// Create a view with an explicit page size
    ///
    /// A page size of zero is rejected rather than clamped, so the view can
    /// never hold an out-of-range page state.
    pub fn with_page_size(
        records: Vec<T>,
        columns: Vec<C>,
        page_size: usize,
    ) -> Result<Self, TableError> {
        if page_size < 1 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        Ok(Self {
            records,
            columns,
            page_size,
            page_index: 0,
        })
    }

    /// Replace the record set, resetting the view to the first page
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.page_index = 0;
    }

    /// Change the page size, resetting the view to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size < 1 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }

    /// The column descriptors, exactly as given
    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// True when there is nothing to show (the "no results" state)
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages, never less than 1
    ///
    /// An empty record set still has one (empty) page, so "page 1 of 1"
    /// stays representable.
    pub fn page_count(&self) -> usize {
        if self.records.is_empty() {
            return 1;
        }
        (self.records.len() + self.page_size - 1) / self.page_size
    }

    /// The records on the current page, in the order they were given
    pub fn current_page(&self) -> &[T] {
        let start = self.page_index * self.page_size;
        let end = (start + self.page_size).min(self.records.len());
        &self.records[start..end]
    }

    pub fn can_go_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Advance one page; a no-op on the last page
    ///
    /// Returns whether the view actually moved.
    pub fn next_page(&mut self) -> bool {
        if self.can_go_next() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; a no-op on the first page
    ///
    /// Returns whether the view actually moved.
    pub fn previous_page(&mut self) -> bool {
        if self.can_go_previous() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }
}
