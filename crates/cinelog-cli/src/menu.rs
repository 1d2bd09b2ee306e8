//! Interactive menu session
//!
//! Every raw input is validated through the matching domain value type and
//! re-prompted until it passes. The session token lives on the session value
//! and is passed explicitly to each gateway call; there is no ambient login
//! state.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use cinelog_core::Error as CoreError;
use cinelog_core::domain::{
    Category, Description, Director, DomainError, DomainResult, Email, Id, ImageUrl, MovieRecord,
    Password, Title, Username, Year,
};
use cinelog_core::gateway::{CatalogClient, SessionToken, SignUpOutcome};
use cinelog_core::reconcile::{self, EditableField, FieldEditor};

/// Interactive catalog session
pub struct MenuSession {
    gateway: CatalogClient,
    editor: DefaultEditor,
    token: Option<SessionToken>,
}

impl MenuSession {
    pub fn new(gateway: CatalogClient) -> Result<Self> {
        Ok(Self {
            gateway,
            editor: DefaultEditor::new()?,
            token: None,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        println!("Welcome to the Cinelog movie catalog!");
        loop {
            print_menu();
            let choice = match self.editor.readline("> ") {
                Ok(line) => line.trim().to_string(),
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(error) => return Err(error.into()),
            };
            match choice.as_str() {
                "1" => self.sign_up().await?,
                "2" => self.login().await?,
                "3" => print_movie_records(&self.gateway.get_movies().await),
                "4" => print_movie_records(&self.gateway.sort_movies_by_title().await),
                "5" => self.add_like().await?,
                "6" => self.remove_like().await?,
                "7" => self.liked_movies().await,
                "8" => self.add_movie().await?,
                "9" => self.edit_movie().await?,
                "10" => self.remove_movie().await?,
                "11" => self.logout().await,
                "0" => break,
                "" => {}
                other => println!("Unknown choice '{other}'."),
            }
        }
        println!("See you next time!");
        Ok(())
    }

    /// Prompt until `parse` accepts the input
    fn read_valid<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> DomainResult<T>,
    ) -> Result<T> {
        loop {
            let line = self.editor.readline(&format!("{prompt}: "))?;
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(error) => println!("Invalid {prompt}: {error}"),
            }
        }
    }

    fn read_category(&mut self) -> Result<Category> {
        print_genres();
        self.read_valid("category number", reconcile::parse_category_choice)
    }

    async fn sign_up(&mut self) -> Result<()> {
        let username = self.read_valid("username", |input| Username::new(input))?;
        let email = self.read_valid("email", |input| Email::new(input))?;
        let password = self.read_valid("password", |input| Password::new(input))?;
        let confirm = self.read_valid("password (again)", |input| Password::new(input))?;

        match self
            .gateway
            .sign_up(&username, &email, &password, &confirm)
            .await
        {
            SignUpOutcome::Created => println!("Welcome to Cinelog, {username}!"),
            SignUpOutcome::PasswordMismatch => println!("The two passwords are not the same."),
            SignUpOutcome::Rejected => println!("Something went wrong during registration."),
            SignUpOutcome::Unreachable => println!("Couldn't reach the server..."),
        }
        Ok(())
    }

    async fn login(&mut self) -> Result<()> {
        if self.token.is_some() {
            println!("You are already logged in!");
            return Ok(());
        }

        let username = self.read_valid("username", |input| Username::new(input))?;
        let password = self.read_valid("password", |input| Password::new(input))?;

        match self.gateway.login(&username, &password).await {
            Some(token) => {
                self.token = Some(token);
                println!("Logged in successfully!");
            }
            None => println!("Login failed!"),
        }
        Ok(())
    }

    async fn add_like(&mut self) -> Result<()> {
        let Some(token) = self.token.clone() else {
            println!("You must be logged in to add a like!");
            return Ok(());
        };

        let movie_id = self.read_valid("movie id", Id::parse)?;
        if self.gateway.add_like(&token, movie_id).await {
            println!("Like added successfully!");
        } else {
            println!("Couldn't like the movie with id {movie_id}...");
        }
        Ok(())
    }

    async fn remove_like(&mut self) -> Result<()> {
        let Some(token) = self.token.clone() else {
            println!("You must be logged in to remove a like!");
            return Ok(());
        };

        let movie_id = self.read_valid("movie id", Id::parse)?;
        if self.gateway.remove_like(&token, movie_id).await {
            println!("Like removed successfully!");
        } else {
            println!("Couldn't remove the like from the movie with id {movie_id}...");
        }
        Ok(())
    }

    async fn liked_movies(&self) {
        let Some(token) = &self.token else {
            println!("You must be logged in to see your liked movies!");
            return;
        };

        let likes = self.gateway.get_liked_movies(token).await;
        if likes.is_empty() {
            println!("You have not liked any movie yet.");
            return;
        }
        for entry in likes {
            match entry.to_like() {
                Ok(like) => print!("{like}"),
                Err(error) => println!("Skipping invalid like entry: {error}"),
            }
        }
    }

    /// Session token, provided the account is an administrator
    async fn admin_token(&self) -> Option<SessionToken> {
        let Some(token) = self.token.clone() else {
            println!("You must be logged in first!");
            return None;
        };
        if self.gateway.is_admin_user(&token).await {
            Some(token)
        } else {
            println!("Only administrators can do that!");
            None
        }
    }

    async fn add_movie(&mut self) -> Result<()> {
        let Some(token) = self.admin_token().await else {
            return Ok(());
        };

        let title = self.read_valid("title", |input| Title::new(input))?;
        let description = self.read_valid("description", |input| Description::new(input))?;
        let year = self.read_valid("year", Year::parse)?;
        let category = self.read_category()?;
        let director = self.read_valid("director", |input| Director::new(input))?;
        let image_url = self.read_valid("image url", |input| ImageUrl::new(input))?;

        if self
            .gateway
            .add_movie(
                &token,
                &title,
                &description,
                &year,
                &category,
                &director,
                &image_url,
            )
            .await
        {
            println!("Movie added successfully!");
        } else {
            println!("Couldn't add the movie.");
        }
        Ok(())
    }

    async fn edit_movie(&mut self) -> Result<()> {
        let Some(token) = self.admin_token().await else {
            return Ok(());
        };

        let movie_id = self.read_valid("movie id", Id::parse)?;
        let Some(record) = self.gateway.get_movie(movie_id).await else {
            println!("No movie with id {movie_id}.");
            return Ok(());
        };

        let mut prompter = PromptEditor {
            editor: &mut self.editor,
        };
        let updated = reconcile::reconcile(&record, &mut prompter)?;
        if updated == record {
            println!("Nothing to update.");
            return Ok(());
        }

        if self.gateway.update_movie(&token, &updated).await {
            println!("Movie updated successfully!");
        } else {
            println!("Couldn't update the movie with id {movie_id}...");
        }
        Ok(())
    }

    async fn remove_movie(&mut self) -> Result<()> {
        let Some(token) = self.admin_token().await else {
            return Ok(());
        };

        let movie_id = self.read_valid("movie id", Id::parse)?;
        if self.gateway.remove_movie(&token, movie_id).await {
            println!("Movie removed successfully!");
        } else {
            println!("Couldn't remove the movie with id {movie_id}...");
        }
        Ok(())
    }

    async fn logout(&mut self) {
        let Some(token) = self.token.take() else {
            println!("You are not logged in!");
            return;
        };

        if self.gateway.logout(&token).await {
            println!("Logout successful!");
        } else {
            println!("Logout failed!");
            self.token = Some(token);
        }
    }
}

/// Rustyline-backed editor decisions for the movie update flow
struct PromptEditor<'a> {
    editor: &'a mut DefaultEditor,
}

impl PromptEditor<'_> {
    fn readline(&mut self, prompt: &str) -> cinelog_core::Result<String> {
        self.editor
            .readline(prompt)
            .map_err(|error| CoreError::Input(error.to_string()))
    }
}

impl FieldEditor for PromptEditor<'_> {
    fn confirm_edit(&mut self, field: EditableField, current: &str) -> cinelog_core::Result<bool> {
        let line = self.readline(&format!("Replace {field} [{current}]? (y/N) "))?;
        Ok(matches!(line.trim(), "y" | "Y" | "yes"))
    }

    fn read_replacement(&mut self, field: EditableField) -> cinelog_core::Result<String> {
        if field == EditableField::Category {
            print_genres();
            return self.readline("new category number: ");
        }
        self.readline(&format!("new {field}: "))
    }

    fn report_invalid(
        &mut self,
        field: EditableField,
        error: &DomainError,
    ) -> cinelog_core::Result<()> {
        println!("Invalid {field}: {error}");
        Ok(())
    }
}

fn print_menu() {
    println!();
    println!("1) Sign up");
    println!("2) Login");
    println!("3) List movies");
    println!("4) Movies by title");
    println!("5) Add like");
    println!("6) Remove like");
    println!("7) My liked movies");
    println!("8) Add movie (admin)");
    println!("9) Edit movie (admin)");
    println!("10) Remove movie (admin)");
    println!("11) Log out");
    println!("0) Exit");
}

fn print_genres() {
    for (position, genre) in Category::ALL.iter().enumerate() {
        println!("{}) {}", position + 1, genre);
    }
}

fn print_movie_records(records: &[MovieRecord]) {
    if records.is_empty() {
        println!("The catalog has no movies right now.");
        return;
    }
    for record in records {
        match record.to_movie() {
            Ok(movie) => println!("{movie}"),
            Err(error) => {
                println!("{} - {} (invalid record: {error})", record.id, record.title);
            }
        }
    }
}
