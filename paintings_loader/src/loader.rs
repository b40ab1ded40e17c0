//! Loading every dataset, in order, into its table.

use std::path::PathBuf;

use crate::common::*;

/// Something which can replace a table with the contents of a [`CsvTable`].
#[async_trait]
pub(crate) trait TableWriter: Send {
    /// Write `table` to `name` under `mode`, returning the number of rows the
    /// destination holds afterwards.
    async fn write_table(
        &mut self,
        name: &PgName,
        table: &CsvTable,
        mode: ReplaceMode,
    ) -> Result<u64>;
}

/// What we did to one dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DatasetReport {
    pub(crate) dataset: DatasetName,
    pub(crate) table: PgName,
    pub(crate) columns: usize,
    pub(crate) rows: u64,
}

/// What we did to every dataset, in load order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoadReport {
    pub(crate) datasets: Vec<DatasetReport>,
}

impl LoadReport {
    /// The total number of rows loaded.
    pub(crate) fn total_rows(&self) -> u64 {
        self.datasets.iter().map(|d| d.rows).sum()
    }
}

/// Reads each dataset's CSV file and hands it to a [`TableWriter`].
///
/// Datasets are processed one at a time. The first failure stops the run;
/// datasets which were already written stay written.
#[derive(Clone, Debug)]
pub(crate) struct Loader {
    source_dir: PathBuf,
    table_schema: Option<String>,
    replace_mode: ReplaceMode,
    datasets: Vec<DatasetName>,
}

impl Loader {
    /// Create a loader for all datasets.
    pub(crate) fn new(source_dir: PathBuf, replace_mode: ReplaceMode) -> Self {
        Self {
            source_dir,
            table_schema: None,
            replace_mode,
            datasets: DatasetName::all().collect(),
        }
    }

    /// Put every table in the PostgreSQL schema `table_schema`.
    pub(crate) fn with_table_schema(mut self, table_schema: Option<String>) -> Self {
        self.table_schema = table_schema;
        self
    }

    /// Only load the datasets in `only`, still in load order. An empty list
    /// means every dataset.
    pub(crate) fn with_only(mut self, only: &[DatasetName]) -> Self {
        if !only.is_empty() {
            self.datasets = DatasetName::all().filter(|d| only.contains(d)).collect();
        }
        self
    }

    /// The datasets we'll load, in order.
    pub(crate) fn datasets(&self) -> &[DatasetName] {
        &self.datasets
    }

    /// Where we read `dataset` from.
    pub(crate) fn source_path(&self, dataset: DatasetName) -> PathBuf {
        self.source_dir.join(dataset.csv_file_name())
    }

    /// Where we write `dataset` to.
    pub(crate) fn table_name(&self, dataset: DatasetName) -> PgName {
        dataset.table_name(self.table_schema.as_deref())
    }

    /// Load every dataset using `writer`.
    #[instrument(level = "info", skip_all, fields(source_dir = %self.source_dir.display()))]
    pub(crate) async fn run<W>(&self, writer: &mut W) -> Result<LoadReport>
    where
        W: TableWriter + ?Sized,
    {
        let mut report = LoadReport::default();
        for &dataset in &self.datasets {
            let dataset_report = self
                .load_dataset(dataset, writer)
                .instrument(info_span!("dataset", %dataset))
                .await
                .with_context(|| format!("error loading dataset {}", dataset))?;
            report.datasets.push(dataset_report);
        }
        info!(
            datasets = report.datasets.len(),
            rows = report.total_rows(),
            "finished loading"
        );
        Ok(report)
    }

    async fn load_dataset<W>(
        &self,
        dataset: DatasetName,
        writer: &mut W,
    ) -> Result<DatasetReport>
    where
        W: TableWriter + ?Sized,
    {
        let table = CsvTable::from_path(&self.source_path(dataset))?;
        let name = self.table_name(dataset);
        let rows = writer.write_table(&name, &table, self.replace_mode).await?;
        debug!(table = %name, columns = table.columns().len(), rows, "loaded table");
        Ok(DatasetReport {
            dataset,
            table: name,
            columns: table.columns().len(),
            rows,
        })
    }
}
