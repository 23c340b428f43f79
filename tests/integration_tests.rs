use agent_summarizer::{
    CellValue, CliConfig, LocalStorage, MergeEngine, MergeError, SheetMergePipeline,
    SpreadsheetDecoder, XlsxEncoder,
};
use anyhow::Result;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::io::{Cursor, Read};
use std::path::Path;
use tempfile::TempDir;

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

fn write_workbook(path: &Path, header: &[&str], rows: &[Vec<Cell<'_>>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32 + 1, c as u16);
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(r, c, *s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                Cell::Blank => {}
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}

fn engine_for(
    inputs: Vec<String>,
    output_path: &str,
) -> MergeEngine<SheetMergePipeline<LocalStorage, CliConfig, SpreadsheetDecoder, XlsxEncoder>> {
    let config = CliConfig::new(inputs, output_path);
    let pipeline = SheetMergePipeline::new(LocalStorage::new(""), config, SpreadsheetDecoder, XlsxEncoder);
    MergeEngine::new(pipeline)
}

fn path_string(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

fn read_rows(bytes: Vec<u8>) -> Result<(Vec<String>, Vec<Vec<Data>>)> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names().to_owned();
    let range = workbook.worksheet_range_at(0).unwrap()?;
    let rows = range.rows().map(|r| r.to_vec()).collect();
    Ok((sheet_names, rows))
}

fn zip_part_to_string(bytes: &[u8], name: &str) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name(name)?;
    let mut out = String::new();
    file.read_to_string(&mut out)?;
    Ok(out)
}

fn as_seconds(cell: &Data) -> f64 {
    match cell {
        Data::DateTime(dt) => (dt.as_f64() * 86_400.0).round(),
        Data::Float(f) => (f * 86_400.0).round(),
        other => panic!("expected a duration cell, got {:?}", other),
    }
}

#[tokio::test]
async fn test_end_to_end_two_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file_a = temp_dir.path().join("a.xlsx");
    let file_b = temp_dir.path().join("b.xlsx");
    let output_dir = temp_dir.path().join("output");

    write_workbook(
        &file_a,
        &["Collector Name", "Talk Time"],
        &[vec![Cell::Text("X"), Cell::Text("0:10:00")]],
    )?;
    write_workbook(
        &file_b,
        &["Collector Name", "Talk Time"],
        &[
            vec![Cell::Text("X"), Cell::Text("0:20:00")],
            vec![Cell::Text("Y"), Cell::Text("0:05:00")],
        ],
    )?;

    let engine = engine_for(
        vec![path_string(&file_a), path_string(&file_b)],
        output_dir.to_str().unwrap(),
    );
    let report = engine.run().await?;

    assert_eq!(report.source_count, 2);
    assert_eq!(report.groups, 2);
    assert_eq!(report.duration_columns, vec!["Talk Time"]);
    assert!(report.file_name.starts_with("Merged_Excel_"));
    assert!(report.file_name.ends_with(".xlsx"));

    let lines: Vec<&str> = report.preview.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("X") && lines[1].ends_with("0:30:00"));
    assert!(lines[2].starts_with("Y") && lines[2].ends_with("0:05:00"));
    assert!(lines[3].starts_with("Average") && lines[3].ends_with("0:17:30"));

    let bytes = std::fs::read(&report.output_path)?;
    let (sheet_names, rows) = read_rows(bytes.clone())?;
    assert_eq!(sheet_names, vec!["Sheet1"]);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][0], Data::String("Collector Name".to_string()));
    assert_eq!(rows[1][0], Data::String("X".to_string()));
    assert_eq!(as_seconds(&rows[1][1]), 1800.0);
    assert_eq!(as_seconds(&rows[2][1]), 300.0);
    assert_eq!(rows[3][0], Data::String("Average".to_string()));
    assert_eq!(as_seconds(&rows[3][1]), 1050.0);

    let styles = zip_part_to_string(&bytes, "xl/styles.xml")?;
    assert!(styles.contains("[h]:mm:ss") || styles.contains(r#"numFmtId="46""#));
    assert!(styles.contains(r#"horizontal="right""#));

    Ok(())
}

#[tokio::test]
async fn test_exported_workbook_reimports_with_same_seconds() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("week.xlsx");
    let first_out = temp_dir.path().join("first");
    let second_out = temp_dir.path().join("second");

    write_workbook(
        &input,
        &["SNo.", "Collector Name", "Talk Time", "Wait Time", "Team"],
        &[
            vec![Cell::Number(1.0), Cell::Text("Ann"), Cell::Text("26:00:00"), Cell::Text("01:30"), Cell::Text("North")],
            vec![Cell::Number(2.0), Cell::Text("Ann"), Cell::Text("1:00:00"), Cell::Number(30.0), Cell::Text("South")],
            vec![Cell::Number(3.0), Cell::Text("Ben"), Cell::Text("bogus"), Cell::Blank, Cell::Blank],
        ],
    )?;

    let first = engine_for(vec![path_string(&input)], first_out.to_str().unwrap())
        .run()
        .await?;

    // 把第一次的輸出再合併一次，秒數不應改變（Average 列會被當成一位客服）
    let second = engine_for(vec![first.output_path.clone()], second_out.to_str().unwrap())
        .run()
        .await?;

    let (_, rows) = read_rows(std::fs::read(&second.output_path)?)?;
    assert_eq!(rows[0][0], Data::String("Collector Name".to_string()));
    assert_eq!(rows[0][1], Data::String("Talk Time".to_string()));
    assert_eq!(rows[0][2], Data::String("Wait Time".to_string()));
    assert_eq!(rows[0][3], Data::String("Team".to_string()));

    assert_eq!(rows[1][0], Data::String("Ann".to_string()));
    assert_eq!(as_seconds(&rows[1][1]), 97_200.0);
    assert_eq!(as_seconds(&rows[1][2]), 120.0);
    assert_eq!(rows[1][3], Data::String("North".to_string()));

    assert_eq!(rows[2][0], Data::String("Ben".to_string()));
    assert_eq!(as_seconds(&rows[2][1]), 0.0);

    assert!(second.preview.contains("27:00:00"));
    Ok(())
}

#[tokio::test]
async fn test_missing_identity_column_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("agents.xlsx");
    let output_dir = temp_dir.path().join("output");

    write_workbook(
        &input,
        &["Agent", "Talk Time"],
        &[vec![Cell::Text("X"), Cell::Text("0:10:00")]],
    )?;

    let err = engine_for(vec![path_string(&input)], output_dir.to_str().unwrap())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::Schema { .. }));
    assert!(!output_dir.exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_workbook_reports_file_name() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("broken.xlsx");
    std::fs::write(&input, b"definitely not a workbook")?;

    let err = engine_for(vec![path_string(&input)], temp_dir.path().to_str().unwrap())
        .run()
        .await
        .unwrap_err();

    match err {
        MergeError::Decode { source_name, .. } => assert_eq!(source_name, "broken.xlsx"),
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_mixed_csv_and_xlsx_inputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let xlsx = temp_dir.path().join("mon.xlsx");
    let csv = temp_dir.path().join("tue.csv");

    write_workbook(
        &xlsx,
        &["Collector Name", "Pause Time", "Total Calls"],
        &[vec![Cell::Text("Dee"), Cell::Text("0:02:00"), Cell::Number(9.0)]],
    )?;
    std::fs::write(&csv, "Collector Name,Spent Time\nDee,1:00:00\n  ,2:00:00\n")?;

    let report = engine_for(
        vec![path_string(&xlsx), path_string(&csv)],
        temp_dir.path().join("out").to_str().unwrap(),
    )
    .run()
    .await?;

    assert_eq!(report.groups, 1);
    assert_eq!(report.input_rows, 3);
    assert_eq!(report.duration_columns, vec!["Spent Time", "Pause Time"]);

    let header = report.preview.lines().next().unwrap();
    assert!(header.starts_with("Collector Name"));
    assert!(!header.contains("Total Calls"));
    assert!(report.preview.contains("1:00:00"));
    Ok(())
}

#[test]
fn test_decoder_reads_first_sheet_only() -> Result<()> {
    use agent_summarizer::domain::ports::SheetDecoder;
    use agent_summarizer::SourceFile;

    let mut workbook = Workbook::new();
    let first = workbook.add_worksheet();
    first.write_string(0, 0, "Collector Name")?;
    first.write_string(1, 0, "Eve")?;
    let second = workbook.add_worksheet();
    second.write_string(0, 0, "Other")?;
    let bytes = workbook.save_to_buffer()?;

    let ds = SpreadsheetDecoder.decode(&SourceFile::new("two_sheets.xlsx", bytes))?;

    assert_eq!(ds.columns, vec!["Collector Name"]);
    assert_eq!(ds.records[0].get("Collector Name"), Some(&CellValue::text("Eve")));
    Ok(())
}

#[test]
fn test_decoder_turns_time_cells_into_duration_text() -> Result<()> {
    use agent_summarizer::domain::ports::SheetDecoder;
    use agent_summarizer::SourceFile;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let time = Format::new().set_num_format("[h]:mm:ss");
    sheet.write_string(0, 0, "Collector Name")?;
    sheet.write_string(0, 1, "Talk Time")?;
    sheet.write_string(1, 0, "Eve")?;
    sheet.write_number_with_format(1, 1, 1.5, &time)?;
    let bytes = workbook.save_to_buffer()?;

    let ds = SpreadsheetDecoder.decode(&SourceFile::new("times.xlsx", bytes))?;

    assert_eq!(ds.records[0].get("Talk Time"), Some(&CellValue::text("36:00:00")));
    Ok(())
}
