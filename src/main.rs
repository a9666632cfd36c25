use rowstore::{Assignment, ColumnDef, Condition, DataType, Database, DbError, Projection, Table, row};

fn print_rows(title: &str, table: &Table) -> Result<(), DbError> {
    println!("{title}");
    for row in table.select(&Projection::All, &[])? {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("  {}", cells.join(" | "));
    }
    Ok(())
}

fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt::init();

    let mut db = Database::new();
    let users = db.create_table(
        "users",
        vec![
            ColumnDef::new("id", DataType::Int),
            ColumnDef::new("name", DataType::Text),
            ColumnDef::new("age", DataType::Int),
        ],
    )?;

    users.insert(row![1, "Juros", 32])?;
    users.insert(row![2, "Meladi", 45])?;
    users.insert(row![3, "Kolinsa", 26])?;
    print_rows("SELECT * FROM users", users)?;

    let ages = users.select(
        &Projection::from_names(&["age"]),
        &[Condition::equal("name", "Kolinsa")],
    )?;
    if let Some(age) = ages.first().and_then(|row| row.first()) {
        println!("age of Kolinsa: {age}");
    }

    users.update(
        &[Assignment::new("age", 25)],
        &[Condition::equal("name", "Kolinsa")],
    )?;
    print_rows("after UPDATE users SET age = 25 WHERE name = 'Kolinsa'", users)?;

    users.delete(&[Condition::not_equal("age", 32)])?;
    print_rows("after DELETE FROM users WHERE age != 32", users)?;

    Ok(())
}
