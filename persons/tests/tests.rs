use std::io::Cursor;

use persons::{read_persons, read_persons_path, write_persons, write_persons_path, Error, Person};
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////

#[test]
fn three_fields_split_on_first_two_spaces() {
    let person = Person::from_line("Smith John Michael");
    assert_eq!(person.last_name(), "Smith");
    assert_eq!(person.first_name(), "John");
    assert_eq!(person.patronymic(), "Michael");
}

#[test]
fn patronymic_absorbs_remaining_spaces() {
    let person = Person::from_line("van-Dyke Mary Anne Lee");
    assert_eq!(person.last_name(), "van-Dyke");
    assert_eq!(person.first_name(), "Mary");
    assert_eq!(person.patronymic(), "Anne Lee");
}

#[test]
fn two_tokens_leave_the_patronymic_empty() {
    let person = Person::from_line("Smith John");
    assert_eq!(person.last_name(), "Smith");
    assert_eq!(person.first_name(), "John");
    assert_eq!(person.patronymic(), "");
}

#[test]
fn trailing_space_means_empty_patronymic() {
    let person = Person::from_line("Doe Jane ");
    assert_eq!(person.last_name(), "Doe");
    assert_eq!(person.first_name(), "Jane");
    assert_eq!(person.patronymic(), "");
    assert_eq!(person.to_string(), "Doe Jane ");
}

#[test]
fn lone_token_and_empty_line() {
    let person = Person::from_line("Smith");
    assert_eq!(person.last_name(), "Smith");
    assert_eq!(person.first_name(), "");
    assert_eq!(person.patronymic(), "");

    let blank = Person::from_line("");
    assert_eq!(blank, Person::default());
}

#[test]
fn setters_replace_fields() {
    let mut person = Person::new("Smith", "John", "Michael");
    person.set_last_name("Doe");
    person.set_first_name("Jane");
    person.set_patronymic("");
    assert_eq!(person, Person::new("Doe", "Jane", ""));
}

////////////////////////////////////////////////////////////////////////////////

#[test]
fn read_pushes_in_file_order() {
    let input = "Smith John Michael\nDoe Jane \n";
    let persons = read_persons(Cursor::new(input)).unwrap();

    assert_eq!(persons.len(), 2);
    // the last line read is on top
    assert_eq!(persons.top().unwrap(), &Person::new("Doe", "Jane", ""));

    let bottom_to_top: Vec<_> = persons.container().iter().cloned().collect();
    assert_eq!(
        bottom_to_top,
        vec![
            Person::new("Smith", "John", "Michael"),
            Person::new("Doe", "Jane", ""),
        ]
    );
}

#[test]
fn write_reproduces_the_lines() {
    let input = "Smith John Michael\nDoe Jane \n";
    let persons = read_persons(Cursor::new(input)).unwrap();

    let mut output = Vec::new();
    write_persons(&persons, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), input);
}

#[test]
fn round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persons.txt");

    let input = "Smith John Michael\nDoe Jane \nSmith John\n";
    let persons = read_persons(Cursor::new(input)).unwrap();
    write_persons_path(&persons, &path).unwrap();

    let reread = read_persons_path(&path).unwrap();
    assert_eq!(reread.len(), 3);
    assert_eq!(reread.top().unwrap(), &Person::new("Smith", "John", ""));

    let mut output = Vec::new();
    write_persons(&reread, &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Smith John Michael\nDoe Jane \nSmith John \n"
    );
}

#[test]
fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.txt");

    let err = read_persons_path(&path).unwrap_err();
    assert!(matches!(err, Error::Unavailable { .. }));
    assert!(err.to_string().contains("nowhere.txt"));
}

#[test]
fn fresh_stack_per_call() {
    let first = read_persons(Cursor::new("A B C\n")).unwrap();
    let second = read_persons(Cursor::new("X Y Z\n")).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first.top().unwrap(), &Person::new("A", "B", "C"));
    assert_eq!(second.top().unwrap(), &Person::new("X", "Y", "Z"));
}
