//! Tab-separated result files, one line per round.

use crate::error::Result;
use crate::graph::{Color, InitialColoring};
use crate::jabeja::JabejaConfig;
use crate::metrics::{Reporter, RoundMetrics};
use std::io::Write;
use std::path::Path;

const DELIMITER: &str = "\t\t";

/// Writes round records in the classic Ja-be-Ja result layout.
///
/// The header is emitted before the first record. The swaps column holds
/// the running total since the start of the run.
#[derive(Debug)]
pub struct ResultWriter<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.out, "# Migration is number of nodes that have changed color.")?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Round{DELIMITER}Edge-Cut{DELIMITER}Swaps{DELIMITER}Migrations"
        )?;
        self.header_written = true;
        Ok(())
    }
}

impl<W: Write> Reporter for ResultWriter<W> {
    fn report(&mut self, metrics: &RoundMetrics) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }
        writeln!(
            self.out,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            metrics.round, metrics.edge_cut, metrics.total_swaps, metrics.migrations
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// File name encoding every parameter of a run.
///
/// ```
/// use jabeja::graph::InitialColoring;
/// use jabeja::jabeja::JabejaConfig;
/// use jabeja::report::result_file_name;
///
/// let name = result_file_name(
///     "graphs/ws-250.graph".as_ref(),
///     InitialColoring::RoundRobin,
///     4,
///     &JabejaConfig::default(),
/// );
/// assert_eq!(
///     name,
///     "ws-250.graph_NS_HYBRID_GICP_ROUND_ROBIN_ANN_STANDARD_T_2.0_RESET_false\
///      _D_0.003_RNSS_3_URSS_6_A_2.0_R_1000_K_4.txt"
/// );
/// ```
pub fn result_file_name(
    graph_path: &Path,
    coloring: InitialColoring,
    partitions: Color,
    config: &JabejaConfig,
) -> String {
    let graph = graph_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    format!(
        "{graph}_NS_{}_GICP_{coloring}_ANN_{}_T_{:?}_RESET_{}_D_{:?}_RNSS_{}_URSS_{}_A_{:?}_R_{}_K_{partitions}.txt",
        config.node_selection,
        config.annealing,
        config.temperature,
        config.reheat,
        config.delta,
        config.local_sample_size,
        config.uniform_sample_size,
        config.alpha,
        config.rounds,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: usize) -> RoundMetrics {
        RoundMetrics {
            round,
            edge_cut: 10 - round,
            swaps: 2,
            local_swaps: 1,
            random_swaps: 1,
            total_swaps: 2 * (round + 1),
            migrations: round,
            temperature: 1.0,
        }
    }

    #[test]
    fn test_header_then_rows() {
        let mut writer = ResultWriter::new(Vec::new());
        writer.report(&record(0)).unwrap();
        writer.report(&record(1)).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "# Migration is number of nodes that have changed color.\n\
             \n\
             Round\t\tEdge-Cut\t\tSwaps\t\tMigrations\n\
             0\t\t10\t\t2\t\t0\n\
             1\t\t9\t\t4\t\t1\n"
        );
    }

    #[test]
    fn test_nothing_written_without_records() {
        let writer = ResultWriter::new(Vec::new());
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_file_name_reflects_policies() {
        let config = JabejaConfig::default()
            .with_annealing(crate::jabeja::AnnealingPolicy::Reciprocal)
            .with_temperature(1.0)
            .with_delta(0.9)
            .with_reheat(true);
        let name = result_file_name(Path::new("/tmp/3elt.graph"), InitialColoring::Batch, 2, &config);
        assert!(name.starts_with("3elt.graph_NS_HYBRID_GICP_BATCH_ANN_CUSTOM_T_1.0_RESET_true_D_0.9_"));
        assert!(name.ends_with("_K_2.txt"));
    }
}
