#![forbid(unsafe_code)]

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use dlist::List;
use stack::Stack;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Persons in file order, bottom of the stack first: the last line read ends
/// up on top.
pub type PersonStack = Stack<Person, List<Person>>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open '{}'", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Person {
    last_name: String,
    first_name: String,
    patronymic: String,
}

impl Person {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        patronymic: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            patronymic: patronymic.into(),
        }
    }

    /// Splits a line on its first two spaces. Everything after the second
    /// space is the patronymic, further spaces included; missing fields come
    /// out empty.
    pub fn from_line(line: &str) -> Self {
        let (last_name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let (first_name, patronymic) = rest.split_once(' ').unwrap_or((rest, ""));
        Self::new(last_name, first_name, patronymic)
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn patronymic(&self) -> &str {
        &self.patronymic
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn set_patronymic(&mut self, patronymic: impl Into<String>) {
        self.patronymic = patronymic.into();
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.last_name, self.first_name, self.patronymic
        )
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Reads one person per line from an already open stream into a fresh stack,
/// pushing in file order.
pub fn read_persons<R: BufRead>(reader: R) -> io::Result<PersonStack> {
    let mut persons = PersonStack::new();
    for line in reader.lines() {
        persons.push(Person::from_line(&line?));
    }
    log::debug!("read {} persons", persons.len());
    Ok(persons)
}

/// Writes one space-joined line per person, bottom of the stack first.
pub fn write_persons<W: Write>(persons: &PersonStack, mut writer: W) -> io::Result<()> {
    for person in persons.container() {
        writeln!(writer, "{}", person)?;
    }
    log::debug!("wrote {} persons", persons.len());
    Ok(())
}

pub fn read_persons_path<P: AsRef<Path>>(path: P) -> Result<PersonStack, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_persons(BufReader::new(file))?)
}

pub fn write_persons_path<P: AsRef<Path>>(persons: &PersonStack, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_persons(persons, &mut writer)?;
    writer.flush().map_err(Error::Io)
}
