//! Instance, solution and trace files.
//!
//! Instance text starts with a `n m` header followed by `m` subset lines.
//! Two line dialects exist: a bare list of element ids, and a list prefixed
//! by its own length (`3 1 4 5`). [`InstanceFormat::Auto`] considers the
//! counted reading only when every non-blank line's first token equals the
//! number of tokens after it, and keeps the bare reading when only that one
//! stays in range and covers the universe.
//!
//! Solution files hold the cost on the first line and the ascending 1-based
//! subset ids on the second. Reference files may hold the cost line only,
//! and lines after the ids are ignored when reading. Trace files hold one `seconds cost` line per
//! checkpoint, seconds printed with two decimals.

use crate::algorithm::Algorithm;
use crate::error::{Result, SetCoverError};
use crate::evaluate::{evaluate, Evaluation};
use crate::instance::ProblemInstance;
use crate::result::SolveResult;
use crate::trace::Trace;
use fixedbitset::FixedBitSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Subset line dialect of an instance file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InstanceFormat {
    /// Element ids only.
    Bare,
    /// A leading size token (ignored) followed by the element ids.
    Counted,
    /// Counted if every non-blank line is self-consistent and the bare
    /// reading is no better at covering the universe, else bare.
    #[default]
    Auto,
}

/// Column delimiter of trace files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TraceFormat {
    /// `12.34 17`
    #[default]
    Space,
    /// `12.34,17`
    Comma,
}

impl TraceFormat {
    fn delimiter(self) -> char {
        match self {
            TraceFormat::Space => ' ',
            TraceFormat::Comma => ',',
        }
    }
}

/// Parses instance text.
///
/// Lines after the `m` subset lines must be blank. A blank line within the
/// subset lines is an empty subset. Errors carry 1-based line numbers.
///
/// # Examples
///
/// ```
/// use u_setcover::io::{parse_instance, InstanceFormat};
///
/// let text = "5 4\n3 1 2 3\n2 2 4\n3 3 4 5\n2 1 5\n";
/// let instance = parse_instance(text.as_bytes(), InstanceFormat::Auto).unwrap();
/// assert_eq!(instance.subset_count(), 4);
/// assert_eq!(instance.members(2), vec![3, 4, 5]);
/// ```
pub fn parse_instance<R: BufRead>(reader: R, format: InstanceFormat) -> Result<ProblemInstance> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;

    let header = lines
        .first()
        .ok_or_else(|| SetCoverError::parse(1, "missing `n m` header"))?;
    let header = parse_tokens(header, 1)?;
    let &[universe_size, subset_count] = header.as_slice() else {
        return Err(SetCoverError::parse(
            1,
            format!("header must be `n m`, got {} token(s)", header.len()),
        ));
    };

    let body = &lines[1..];
    if body.len() < subset_count {
        return Err(SetCoverError::parse(
            lines.len() + 1,
            format!(
                "header declares {subset_count} subsets, found {} line(s)",
                body.len()
            ),
        ));
    }
    if let Some(pos) = body[subset_count..]
        .iter()
        .position(|line| !line.trim().is_empty())
    {
        return Err(SetCoverError::parse(
            subset_count + pos + 2,
            format!("header declares {subset_count} subsets, found more"),
        ));
    }

    let rows = body[..subset_count]
        .iter()
        .enumerate()
        .map(|(i, line)| parse_tokens(line, i + 2))
        .collect::<Result<Vec<_>>>()?;

    let counted = match format {
        InstanceFormat::Bare => false,
        InstanceFormat::Counted => true,
        InstanceFormat::Auto => detect_counted(&rows, universe_size),
    };

    let mut subsets = Vec::with_capacity(subset_count);
    for (i, row) in rows.into_iter().enumerate() {
        let line = i + 2;
        let members = if counted && !row.is_empty() {
            &row[1..]
        } else {
            &row[..]
        };
        if let Some(&bad) = members
            .iter()
            .find(|&&e| e == 0 || e > universe_size)
        {
            return Err(SetCoverError::parse(
                line,
                format!("element {bad} outside 1..={universe_size}"),
            ));
        }
        subsets.push(members.to_vec());
    }

    ProblemInstance::new(universe_size, subsets)
}

/// Whether `Auto` should read the rows as counted.
///
/// Counted needs every non-blank row to start with its own length. When
/// the bare reading is also plausible, the reading that stays in range and
/// covers the universe wins; ties go to counted.
fn detect_counted(rows: &[Vec<usize>], universe_size: usize) -> bool {
    let consistent = rows.iter().any(|row| !row.is_empty())
        && rows
            .iter()
            .filter(|row| !row.is_empty())
            .all(|row| row[0] == row.len() - 1);
    if !consistent {
        return false;
    }
    reading_quality(rows, true, universe_size) >= reading_quality(rows, false, universe_size)
}

/// `(all elements in range, union covers the universe)` for one reading.
fn reading_quality(rows: &[Vec<usize>], counted: bool, universe_size: usize) -> (bool, bool) {
    let mut covered = FixedBitSet::with_capacity(universe_size);
    let mut in_range = true;
    for row in rows {
        let members = if counted && !row.is_empty() { &row[1..] } else { &row[..] };
        for &e in members {
            if e == 0 || e > universe_size {
                in_range = false;
            } else {
                covered.insert(e - 1);
            }
        }
    }
    (in_range, covered.count_ones(..) == universe_size)
}

fn parse_tokens(line: &str, line_no: usize) -> Result<Vec<usize>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                let message = format!("expected non-negative integer, got {token:?}");
                SetCoverError::parse(line_no, message)
            })
        })
        .collect()
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>, format: InstanceFormat) -> Result<ProblemInstance> {
    let file = File::open(path.as_ref())?;
    parse_instance(BufReader::new(file), format)
}

/// Writes the cost line and the ascending 1-based subset ids.
pub fn write_solution<W: Write>(mut writer: W, result: &SolveResult) -> Result<()> {
    writeln!(writer, "{}", result.best_cost)?;
    let ids: Vec<String> = result.one_based().iter().map(usize::to_string).collect();
    writeln!(writer, "{}", ids.join(" "))?;
    Ok(())
}

/// Contents of a solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionFile {
    /// Cost line.
    pub cost: usize,
    /// 0-based subset indices in file order. Empty when the file has no id line.
    pub subsets: Vec<usize>,
}

impl SolutionFile {
    /// Checks the solution against `instance`.
    ///
    /// The ids must be distinct valid subset indices, their count must equal
    /// the cost line, and together they must cover the universe.
    pub fn verify(&self, instance: &ProblemInstance) -> Result<Evaluation> {
        let m = instance.subset_count();
        let mut seen = FixedBitSet::with_capacity(m);
        for &index in &self.subsets {
            if index >= m {
                return Err(SetCoverError::InvalidSolution(format!(
                    "subset id {} exceeds subset count {m}",
                    index + 1
                )));
            }
            if seen.put(index) {
                return Err(SetCoverError::InvalidSolution(format!(
                    "subset id {} listed twice",
                    index + 1
                )));
            }
        }
        if self.cost != self.subsets.len() {
            return Err(SetCoverError::InvalidSolution(format!(
                "cost {} does not match {} listed subsets",
                self.cost,
                self.subsets.len()
            )));
        }
        let eval = evaluate(instance, &self.subsets);
        if !eval.feasible {
            return Err(SetCoverError::InvalidSolution(
                "listed subsets do not cover the universe".into(),
            ));
        }
        Ok(eval)
    }
}

/// Parses solution text as written by [`write_solution`].
///
/// # Examples
///
/// ```
/// use u_setcover::io::parse_solution;
///
/// let sol = parse_solution("2\n1 3\n".as_bytes()).unwrap();
/// assert_eq!(sol.cost, 2);
/// assert_eq!(sol.subsets, vec![0, 2]);
/// ```
pub fn parse_solution<R: BufRead>(reader: R) -> Result<SolutionFile> {
    let mut lines = reader.lines();
    let cost_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| SetCoverError::parse(1, "missing cost line"))?;
    let cost = match parse_tokens(&cost_line, 1)?.as_slice() {
        &[cost] => cost,
        _ => return Err(SetCoverError::parse(1, "expected a single cost value")),
    };

    let ids = match lines.next().transpose()? {
        Some(line) => parse_tokens(&line, 2)?,
        None => Vec::new(),
    };
    let subsets = ids
        .into_iter()
        .map(|id| {
            id.checked_sub(1)
                .ok_or_else(|| SetCoverError::parse(2, "subset ids are 1-based"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SolutionFile { cost, subsets })
}

/// Reads and parses a solution file.
pub fn read_solution(path: impl AsRef<Path>) -> Result<SolutionFile> {
    let file = File::open(path.as_ref())?;
    parse_solution(BufReader::new(file))
}

/// Writes one `seconds<delim>cost` line per checkpoint.
pub fn write_trace<W: Write>(mut writer: W, trace: &Trace, format: TraceFormat) -> Result<()> {
    let delim = format.delimiter();
    for checkpoint in trace.iter() {
        writeln!(
            writer,
            "{:.2}{delim}{}",
            checkpoint.elapsed_secs, checkpoint.cost
        )?;
    }
    Ok(())
}

/// Instance name used in output files: the file name up to its first dot.
pub fn instance_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

/// Output file stem `<instance>_<alg>_<cutoff>[_<seed>]`.
///
/// The seed is appended only for stochastic algorithms.
///
/// # Examples
///
/// ```
/// use u_setcover::io::output_stem;
/// use u_setcover::Algorithm;
///
/// assert_eq!(output_stem("small1", Algorithm::BranchAndBound, 600.0, Some(3)), "small1_BnB_600");
/// assert_eq!(output_stem("small1", Algorithm::HillClimbing, 2.5, Some(3)), "small1_LS2_2.5_3");
/// ```
pub fn output_stem(
    instance: &str,
    algorithm: Algorithm,
    cutoff_secs: f64,
    seed: Option<u64>,
) -> String {
    let mut stem = format!("{instance}_{algorithm}_{cutoff_secs}");
    if algorithm.is_stochastic() {
        if let Some(seed) = seed {
            stem.push_str(&format!("_{seed}"));
        }
    }
    stem
}

/// Writes `<stem>.sol` and `<stem>.trace` into `dir`, returning both paths.
pub fn write_output_files(
    dir: &Path,
    stem: &str,
    result: &SolveResult,
    format: TraceFormat,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let sol_path = dir.join(format!("{stem}.sol"));
    let trace_path = dir.join(format!("{stem}.trace"));

    let mut sol = BufWriter::new(File::create(&sol_path)?);
    write_solution(&mut sol, result)?;
    sol.flush()?;

    let mut trace = BufWriter::new(File::create(&trace_path)?);
    write_trace(&mut trace, &result.trace, format)?;
    trace.flush()?;

    Ok((sol_path, trace_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Termination;

    fn parse(text: &str, format: InstanceFormat) -> Result<ProblemInstance> {
        parse_instance(text.as_bytes(), format)
    }

    fn parse_line(err: SetCoverError) -> usize {
        match err {
            SetCoverError::Parse { line, .. } => line,
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_parse_bare() {
        let inst = parse("5 4\n1 2 3\n2 4\n3 4 5\n1 5\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.universe_size(), 5);
        assert_eq!(inst.members(0), vec![1, 2, 3]);
        assert_eq!(inst.members(3), vec![1, 5]);
    }

    #[test]
    fn test_parse_counted_auto_detects() {
        let inst = parse("5 4\n3 1 2 3\n2 2 4\n3 3 4 5\n2 1 5\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.members(0), vec![1, 2, 3]);
        assert_eq!(inst.members(1), vec![2, 4]);
    }

    #[test]
    fn test_auto_falls_back_to_bare_on_one_mismatch() {
        // Line 3 ("1 4") looks counted alone, but line 2 does not.
        let inst = parse("5 2\n1 2 3\n1 4\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.members(0), vec![1, 2, 3]);
        assert_eq!(inst.members(1), vec![1, 4]);
    }

    #[test]
    fn test_auto_keeps_bare_when_counted_loses_elements() {
        // Every line starts with its own length, but read as counted,
        // element 2 is in no subset.
        let inst = parse("5 3\n2 1 5\n1 3\n1 4\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.members(0), vec![1, 2, 5]);
        assert_eq!(inst.members(1), vec![1, 3]);
        assert_eq!(inst.members(2), vec![1, 4]);
        assert!(inst.check_feasible().is_ok());
    }

    #[test]
    fn test_auto_prefers_counted_when_bare_out_of_range() {
        // Read bare, the leading 3 is outside 1..=2.
        let inst = parse("2 2\n3 1 2 2\n1 1\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.members(0), vec![1, 2]);
        assert_eq!(inst.members(1), vec![1]);
    }

    #[test]
    fn test_auto_tie_reads_counted() {
        // Both readings cover {1, 2}.
        let inst = parse("2 2\n1 2\n1 1\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.members(0), vec![2]);
        assert_eq!(inst.members(1), vec![1]);
    }

    #[test]
    fn test_explicit_counted_ignores_leading_token() {
        let inst = parse("4 1\n9 1 4\n", InstanceFormat::Counted).unwrap();
        assert_eq!(inst.members(0), vec![1, 4]);
    }

    #[test]
    fn test_explicit_bare_keeps_leading_token() {
        let inst = parse("4 1\n1 4\n", InstanceFormat::Bare).unwrap();
        assert_eq!(inst.members(0), vec![1, 4]);
    }

    #[test]
    fn test_blank_subset_line_is_empty_subset() {
        let inst = parse("3 3\n1 2\n\n3\n", InstanceFormat::Auto).unwrap();
        assert_eq!(inst.subset_count(), 3);
        assert!(inst.members(1).is_empty());
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let inst = parse("2 1\n1 2\n\n\n", InstanceFormat::Bare).unwrap();
        assert_eq!(inst.subset_count(), 1);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(parse_line(parse("", InstanceFormat::Auto).unwrap_err()), 1);
        assert_eq!(parse_line(parse("5\n", InstanceFormat::Auto).unwrap_err()), 1);
    }

    #[test]
    fn test_too_few_lines() {
        let err = parse("3 3\n1\n2\n", InstanceFormat::Bare).unwrap_err();
        assert_eq!(parse_line(err), 4);
    }

    #[test]
    fn test_too_many_lines() {
        let err = parse("3 1\n1 2 3\n2\n", InstanceFormat::Bare).unwrap_err();
        assert_eq!(parse_line(err), 3);
    }

    #[test]
    fn test_non_integer_token() {
        let err = parse("3 2\n1 2\n2 x\n", InstanceFormat::Bare).unwrap_err();
        assert_eq!(parse_line(err), 3);
        let err = parse("3 2\n1 -2\n2\n", InstanceFormat::Bare).unwrap_err();
        assert_eq!(parse_line(err), 2);
    }

    #[test]
    fn test_out_of_range_element() {
        let err = parse("3 2\n1 2\n4\n", InstanceFormat::Bare).unwrap_err();
        assert_eq!(parse_line(err), 3);
        let err = parse("3 1\n0 1\n", InstanceFormat::Bare).unwrap_err();
        assert_eq!(parse_line(err), 2);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err =
            read_instance("/nonexistent/u-setcover/none.in", InstanceFormat::Auto).unwrap_err();
        assert!(matches!(err, SetCoverError::Io(_)));
    }

    fn sample_result() -> SolveResult {
        let mut trace = Trace::new();
        trace.record(0.001, 3);
        trace.record(1.256, 2);
        SolveResult::new(vec![2, 0], trace, Termination::Optimal, 7)
    }

    #[test]
    fn test_write_solution() {
        let mut out = Vec::new();
        write_solution(&mut out, &sample_result()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n1 3\n");
    }

    #[test]
    fn test_write_trace_formats() {
        let result = sample_result();
        let mut space = Vec::new();
        write_trace(&mut space, &result.trace, TraceFormat::Space).unwrap();
        assert_eq!(String::from_utf8(space).unwrap(), "0.00 3\n1.26 2\n");

        let mut comma = Vec::new();
        write_trace(&mut comma, &result.trace, TraceFormat::Comma).unwrap();
        assert_eq!(String::from_utf8(comma).unwrap(), "0.00,3\n1.26,2\n");
    }

    #[test]
    fn test_written_solution_reads_back_and_verifies() {
        let instance = parse("5 4\n1 2 3\n2 4\n3 4 5\n1 5\n", InstanceFormat::Auto).unwrap();
        let result = crate::Algorithm::BranchAndBound
            .solve(&instance, &crate::TimeBudget::unlimited(), None)
            .unwrap();
        let mut buf = Vec::new();
        write_solution(&mut buf, &result).unwrap();

        let sol = parse_solution(buf.as_slice()).unwrap();
        assert_eq!(sol.cost, result.best_cost);
        assert_eq!(sol.subsets, result.best_solution);
        assert_eq!(sol.verify(&instance).unwrap().cost, 2);
    }

    #[test]
    fn test_solution_with_trailing_trace_lines() {
        let sol = parse_solution("2\n1 3\n0.00,3\n0.41,2\n".as_bytes()).unwrap();
        assert_eq!(sol.subsets, vec![0, 2]);
    }

    #[test]
    fn test_solution_cost_only() {
        let sol = parse_solution("7\n".as_bytes()).unwrap();
        assert_eq!(sol.cost, 7);
        assert!(sol.subsets.is_empty());
    }

    #[test]
    fn test_solution_parse_errors() {
        assert_eq!(parse_line(parse_solution("".as_bytes()).unwrap_err()), 1);
        assert_eq!(parse_line(parse_solution("2 3\n1 2\n".as_bytes()).unwrap_err()), 1);
        assert_eq!(parse_line(parse_solution("x\n".as_bytes()).unwrap_err()), 1);
        assert_eq!(parse_line(parse_solution("2\n0 1\n".as_bytes()).unwrap_err()), 2);
        assert_eq!(parse_line(parse_solution("2\n1 b\n".as_bytes()).unwrap_err()), 2);
    }

    #[test]
    fn test_verify_rejects_bad_solutions() {
        let instance = parse("5 4\n1 2 3\n2 4\n3 4 5\n1 5\n", InstanceFormat::Auto).unwrap();
        let cases = [
            SolutionFile { cost: 2, subsets: vec![0, 4] },
            SolutionFile { cost: 2, subsets: vec![0, 0] },
            SolutionFile { cost: 3, subsets: vec![0, 2] },
            SolutionFile { cost: 2, subsets: vec![0, 1] },
        ];
        for sol in &cases {
            let err = sol.verify(&instance).unwrap_err();
            assert!(matches!(err, SetCoverError::InvalidSolution(_)), "{sol:?}");
        }
    }

    #[test]
    fn test_instance_name() {
        assert_eq!(instance_name(Path::new("data/large3.in")), "large3");
        assert_eq!(instance_name(Path::new("test.v2.in")), "test");
        assert_eq!(instance_name(Path::new("plain")), "plain");
    }

    #[test]
    fn test_output_stem_seed_only_for_stochastic() {
        assert_eq!(output_stem("t", Algorithm::Approx, 10.0, Some(1)), "t_Approx_10");
        assert_eq!(output_stem("t", Algorithm::SimulatedAnnealing, 10.0, Some(1)), "t_LS1_10_1");
        assert_eq!(output_stem("t", Algorithm::SimulatedAnnealing, 10.0, None), "t_LS1_10");
    }
}
