//! Titanic Preprocessing Pipeline
//!
//! This example prepares the classic Titanic passenger table with the column
//! adapters:
//! - Mean imputation of the numeric columns through a `SubsetSelector`
//! - Per-column standardization through a `PerColumnTransformer`
//! - A supervised per-column target encoding of the passenger class
//! - Saving and reloading the adapter configuration
//!
//! Run with: cargo run --example titanic_pipeline

use column_adapters::preprocessing::{
    ConfigFile, Delegate, PerColumnTransformer, PreprocessingError, SubsetSelector,
    SubsetSelectorConfig, SupervisedTransformer, TablePipeline, TableTransformer, Transformer,
    TransformerArgs,
};
use column_adapters::serialization::SerializableParams;
use column_adapters::table::{Column, DTypeSelector, Table};
use std::collections::HashMap;
use std::error::Error;

/// Titanic passengers (subset of the classic dataset). Empty ages are missing.
const PASSENGERS: &str = "\
name,pclass,sex,age,sibsp,parch,fare,embarked
Braund,3,male,22,1,0,7.25,S
Cumings,1,female,38,1,0,71.2833,C
Heikkinen,3,female,26,0,0,7.925,S
Futrelle,1,female,35,1,0,53.1,S
Allen,3,male,35,0,0,8.05,S
Moran,3,male,,0,0,8.4583,Q
McCarthy,1,male,54,0,0,51.8625,S
Palsson,3,male,2,3,1,21.075,S
Johnson,3,female,27,0,2,11.1333,S
Nasser,2,female,14,1,0,30.0708,C
Sandstrom,3,female,4,1,1,16.7,S
Bonnell,1,female,58,0,0,26.55,S
Saundercock,3,male,20,0,0,8.05,S
Andersson,3,male,39,1,5,31.275,S
Vestrom,3,female,14,0,0,7.8542,S
Hewlett,2,female,55,0,0,16,S
Rice,3,male,2,4,1,29.125,Q
Williams,2,male,,0,0,13,S
Vander Planke,3,female,31,1,0,18,S
Masselmani,3,female,,0,0,7.225,C
";

/// Survived (0=no, 1=yes), one per passenger above.
const SURVIVED: [f64; 20] = [
    0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0,
    0.0, 1.0,
];

fn numeric(column: &Column) -> Result<Vec<f64>, PreprocessingError> {
    column.to_f64_vec().ok_or_else(|| {
        PreprocessingError::Delegate(format!("expected numeric data, got {}", column.dtype()))
    })
}

/// Fills missing values with the mean of the observed values, per column.
#[derive(Default)]
struct MeanImputer {
    means: Vec<f64>,
}

impl Transformer<Table> for MeanImputer {
    fn fit(&mut self, data: &Table) -> Result<(), PreprocessingError> {
        self.means = Vec::with_capacity(data.n_columns());
        for (_, column) in data.iter() {
            let observed: Vec<f64> = numeric(column)?.into_iter().filter(|v| !v.is_nan()).collect();
            self.means
                .push(observed.iter().sum::<f64>() / observed.len().max(1) as f64);
        }
        Ok(())
    }

    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        let mut columns = Vec::with_capacity(data.n_columns());
        for ((name, column), mean) in data.iter().zip(&self.means) {
            let filled: Vec<f64> = numeric(column)?
                .into_iter()
                .map(|v| if v.is_nan() { *mean } else { v })
                .collect();
            columns.push((name, Column::Float64(filled)));
        }
        Table::new(columns)
    }
}

/// Z-score normalization of one column.
struct StandardScaler {
    with_mean: bool,
    mean: f64,
    std: f64,
}

impl StandardScaler {
    fn from_args(args: &TransformerArgs) -> Result<Self, PreprocessingError> {
        let with_mean = match args.kwargs.get("with_mean") {
            Some(value) => value.as_bool().ok_or_else(|| {
                PreprocessingError::InvalidParameter(format!(
                    "with_mean must be a bool, got {}",
                    value
                ))
            })?,
            None => true,
        };
        Ok(Self {
            with_mean,
            mean: 0.0,
            std: 1.0,
        })
    }
}

impl Transformer<Column> for StandardScaler {
    fn fit(&mut self, data: &Column) -> Result<(), PreprocessingError> {
        let values = numeric(data)?;
        let n = values.len().max(1) as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        self.mean = if self.with_mean { mean } else { 0.0 };
        self.std = if var > 0.0 { var.sqrt() } else { 1.0 };
        Ok(())
    }

    fn transform(&self, data: &Column) -> Result<Column, PreprocessingError> {
        Ok(Column::Float64(
            numeric(data)?
                .iter()
                .map(|v| (v - self.mean) / self.std)
                .collect(),
        ))
    }
}

/// Replaces each category with the mean label observed for it.
#[derive(Default)]
struct TargetEncoder {
    means: HashMap<String, f64>,
    prior: f64,
}

fn category_keys(column: &Column) -> Vec<String> {
    match column {
        Column::Utf8(values) => values.clone(),
        Column::Int64(values) => values.iter().map(|v| v.to_string()).collect(),
        Column::Boolean(values) => values.iter().map(|v| v.to_string()).collect(),
        Column::Float64(values) => values.iter().map(|v| v.to_string()).collect(),
    }
}

impl SupervisedTransformer<Column> for TargetEncoder {
    fn fit(&mut self, data: &Column, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        let labels = labels.ok_or_else(|| {
            PreprocessingError::InvalidParameter("TargetEncoder needs labels".to_string())
        })?;
        let labels = numeric(labels)?;

        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        for (key, label) in category_keys(data).into_iter().zip(&labels) {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += label;
            entry.1 += 1;
        }
        self.prior = labels.iter().sum::<f64>() / labels.len().max(1) as f64;
        self.means = sums
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();
        Ok(())
    }

    fn transform(
        &self,
        data: &Column,
        _labels: Option<&Column>,
    ) -> Result<Column, PreprocessingError> {
        Ok(Column::Float64(
            category_keys(data)
                .iter()
                .map(|key| self.means.get(key).copied().unwrap_or(self.prior))
                .collect(),
        ))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Titanic Preprocessing Pipeline ===\n");

    // 1. Load data
    println!("Loading Titanic dataset...");
    let passengers = Table::from_csv_reader(PASSENGERS.as_bytes())?;
    println!(
        "  {} passengers, {} columns, {} survivors",
        passengers.n_rows(),
        passengers.n_columns(),
        SURVIVED.iter().filter(|&&s| s == 1.0).count()
    );
    for (name, dtype) in passengers.dtypes() {
        println!("  {:<10} {}", name, dtype);
    }

    // 2. Train/test split (80/20)
    let split_idx = (passengers.n_rows() as f64 * 0.8) as usize;
    let (mut train, mut test) = split_rows(&passengers, split_idx)?;
    let train_labels = Column::from(SURVIVED[..split_idx].to_vec());
    println!("\nTrain/test split: {}/{}", train.n_rows(), test.n_rows());

    // 3. Build preprocessing pipeline
    println!("\nBuilding preprocessing pipeline...");
    let impute_config = SubsetSelectorConfig::from_json_str(
        r#"{
            "selection": {
                "columns": ["age", "sibsp", "parch", "fare"],
                "include_dtypes": ["numeric"]
            }
        }"#,
    )?;

    let mut pipeline = TablePipeline::new()
        // Age, SibSp, Parch, Fare - impute
        .add(
            "impute",
            SubsetSelector::from_config(
                Delegate::unsupervised(MeanImputer::default()),
                impute_config.clone(),
            ),
        )
        // Pclass - target encode against survival
        .add(
            "encode_class",
            SubsetSelector::new(Delegate::supervised(PerColumnAsTable::new(
                PerColumnTransformer::new(|_: &TransformerArgs| {
                    Ok(Delegate::supervised(TargetEncoder::default()))
                }),
            )))
            .with_columns(["pclass"]),
        )
        // Every numeric column - standardize independently
        .add(
            "scale",
            SubsetSelector::new(Delegate::supervised(PerColumnAsTable::new(
                PerColumnTransformer::new(|args: &TransformerArgs| {
                    Ok(Delegate::unsupervised(StandardScaler::from_args(args)?))
                })
                .with_args(TransformerArgs::new().kwarg("with_mean", true)),
            )))
            .include_dtypes([DTypeSelector::Numeric]),
        );
    println!("  Steps: {:?}", pipeline.step_names());

    // 4. Fit and transform
    println!("Fitting preprocessor...");
    let train_prepared = pipeline.fit_transform(&mut train, Some(&train_labels))?;
    let test_prepared = pipeline.transform(&mut test, None)?;

    println!("\n=== Prepared Test Rows ===\n");
    print_rows(&test_prepared)?;
    println!(
        "\nTrain columns after preprocessing: {:?}",
        train_prepared.dtypes()
    );
    println!(
        "Training data untouched: age still missing = {}",
        train.column("age")?.to_f64_vec().unwrap_or_default().iter().any(|v| v.is_nan())
    );

    // 5. Save configuration
    println!("\n=== Saving Configuration ===");
    let temp_file = std::env::temp_dir().join("titanic_impute.bin");
    impute_config.save_to_file(&temp_file)?;
    println!("Configuration saved to: {:?}", temp_file);

    // 6. Load and verify
    let loaded = SubsetSelectorConfig::load_from_file(&temp_file)?;
    println!("Configuration loaded: {}", loaded.to_json_string()?);
    assert_eq!(loaded, impute_config);

    // Cleanup
    std::fs::remove_file(&temp_file).ok();

    println!("\n=== Pipeline Complete ===");
    Ok(())
}

/// Lets a `PerColumnTransformer` act as the table delegate of a `SubsetSelector`.
struct PerColumnAsTable {
    inner: PerColumnTransformer,
}

impl PerColumnAsTable {
    fn new(inner: PerColumnTransformer) -> Self {
        Self { inner }
    }
}

impl SupervisedTransformer<Table> for PerColumnAsTable {
    fn fit(&mut self, data: &Table, labels: Option<&Column>) -> Result<(), PreprocessingError> {
        self.inner.fit(data, labels)
    }

    fn transform(
        &self,
        data: &Table,
        labels: Option<&Column>,
    ) -> Result<Table, PreprocessingError> {
        self.inner.transform(&mut data.clone(), labels)
    }
}

/// Split a table into its first `at` rows and the rest.
fn split_rows(table: &Table, at: usize) -> Result<(Table, Table), PreprocessingError> {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    for (name, column) in table.iter() {
        let (a, b) = match column {
            Column::Float64(v) => (Column::from(v[..at].to_vec()), Column::from(v[at..].to_vec())),
            Column::Int64(v) => (Column::from(v[..at].to_vec()), Column::from(v[at..].to_vec())),
            Column::Boolean(v) => (Column::from(v[..at].to_vec()), Column::from(v[at..].to_vec())),
            Column::Utf8(v) => (Column::from(v[..at].to_vec()), Column::from(v[at..].to_vec())),
        };
        head.push((name, a));
        tail.push((name, b));
    }
    Ok((Table::new(head)?, Table::new(tail)?))
}

fn print_rows(table: &Table) -> Result<(), PreprocessingError> {
    let names = table.column_names();
    println!(
        "{}",
        names
            .iter()
            .map(|n| format!("{:<12}", n))
            .collect::<String>()
    );
    println!("{}", "-".repeat(12 * names.len()));
    for row in 0..table.n_rows() {
        let mut line = String::new();
        for name in names {
            let cell = match table.column(name)? {
                Column::Float64(v) => format!("{:.3}", v[row]),
                Column::Int64(v) => v[row].to_string(),
                Column::Boolean(v) => v[row].to_string(),
                Column::Utf8(v) => v[row].clone(),
            };
            line.push_str(&format!("{:<12}", cell));
        }
        println!("{}", line);
    }
    Ok(())
}
