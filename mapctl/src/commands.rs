//! Handlers for the `mapctl` subcommands
use crate::{
    cli::{Commands, SortKey},
    output::{self, rows::LocationRow},
};
use anyhow::{Result, anyhow};
use libmapping::{
    Database,
    core::{
        loadable::Loadable,
        query::{SortOrder, SortSpec, SortSpecs},
    },
    location::{Location, LocationForm, SortField},
};
use tracing::debug;

fn sort_specs(key: Option<SortKey>, reverse: bool) -> Option<SortSpecs<SortField>> {
    let order = match reverse {
        true => SortOrder::Descending,
        false => SortOrder::Ascending,
    };
    let field = match key {
        Some(SortKey::Id) => SortField::Id,
        Some(SortKey::Name) => SortField::Name,
        None if reverse => SortField::Name,
        None => return None,
    };
    let mut specs = vec![SortSpec::new(field.clone(), order)];
    if let SortField::Name = field {
        specs.push(SortSpec::new(SortField::Id, order));
    }
    Some(SortSpecs(specs))
}

fn not_found(id: i64) -> impl FnOnce(libmapping::Error) -> anyhow::Error {
    move |e| match e.is_not_found() {
        true => anyhow!("Location {id} not found"),
        false => e.into(),
    }
}

pub(crate) async fn handle_command(command: Commands, db: &Database) -> Result<()> {
    match command {
        Commands::List {
            sort,
            reverse,
            output,
        } => {
            let locations = Location::load_all(None, sort_specs(sort, reverse), db).await?;
            let rows = locations.iter().map(LocationRow::new);
            println!("{}", output::format_seq(rows, output.output)?);
            Ok(())
        }
        Commands::Show { id, output } => match Location::load(id, db).await {
            Ok(loc) => {
                let str = output::format_one(LocationRow::new(&loc), output.output)?;
                println!("{str}");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                println!("Location {id} not found");
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        Commands::Add {
            name,
            description,
            latitude,
            longitude,
        } => {
            let form = LocationForm {
                name: Some(name),
                description,
                latitude: Some(latitude),
                longitude: Some(longitude),
            };
            let mut location = form.to_new_location()?;
            let newid = location.insert(db).await?;
            println!("Added location {newid} to database");
            Ok(())
        }
        Commands::Modify {
            id,
            name,
            description,
            latitude,
            longitude,
        } => {
            let form = LocationForm {
                name,
                description,
                latitude,
                longitude,
            };
            let mut location = Location::load(id, db).await.map_err(not_found(id))?;
            form.apply_to(&mut location)?;
            debug!(?location, "Updating location");
            location.update(db).await.map_err(not_found(id))?;
            println!("Modified location {id}");
            Ok(())
        }
        Commands::Remove { id } => {
            Location::delete_id(&id, db).await.map_err(not_found(id))?;
            println!("Removed location {id} from database");
            Ok(())
        }
    }
}
