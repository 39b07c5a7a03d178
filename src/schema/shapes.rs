//! Built-in shapes
//!
//! Shapes are immutable constants built once on first use and shared by
//! every caller.

use std::sync::OnceLock;

use super::types::{EnumKind, FieldDef, Shape, ShapeName};

/// Catalog of every built-in shape.
struct ShapeCatalog {
    person: Shape,
    location: Shape,
    user_info: Shape,
    expert_person: Shape,
    person_query: Shape,
    person_id: Shape,
    login_form: Shape,
    contact_form: Shape,
}

static CATALOG: OnceLock<ShapeCatalog> = OnceLock::new();

/// Returns the built-in shape with the given name.
pub fn shape(name: ShapeName) -> &'static Shape {
    let catalog = CATALOG.get_or_init(ShapeCatalog::build);
    match name {
        ShapeName::Person => &catalog.person,
        ShapeName::Location => &catalog.location,
        ShapeName::UserInfo => &catalog.user_info,
        ShapeName::ExpertPerson => &catalog.expert_person,
        ShapeName::PersonQuery => &catalog.person_query,
        ShapeName::PersonId => &catalog.person_id,
        ShapeName::LoginForm => &catalog.login_form,
        ShapeName::ContactForm => &catalog.contact_form,
    }
}

/// Iterates over every built-in shape.
pub fn all_shapes() -> impl Iterator<Item = &'static Shape> {
    ShapeName::ALL.into_iter().map(shape)
}

impl ShapeCatalog {
    fn build() -> Self {
        let person = person_shape();
        let location = location_shape();
        let user_info = Shape::compose(ShapeName::UserInfo, &[&location, &person]);
        let expert_person = Shape::extend(
            ShapeName::ExpertPerson,
            &person,
            vec![FieldDef::constant_bool("english_academy_access", true)],
        );

        Self {
            person,
            location,
            user_info,
            expert_person,
            person_query: person_query_shape(),
            person_id: Shape::new(
                ShapeName::PersonId,
                vec![FieldDef::required_int("person_id").gt(0)],
            ),
            login_form: Shape::new(
                ShapeName::LoginForm,
                vec![
                    FieldDef::required_string("username"),
                    FieldDef::required_string("password"),
                ],
            ),
            contact_form: contact_form_shape(),
        }
    }
}

fn person_shape() -> Shape {
    Shape::new(
        ShapeName::Person,
        vec![
            FieldDef::required_string("first_name").length(1, 20),
            FieldDef::required_string("last_name").length(1, 30),
            FieldDef::required_int("age").gt(0).lt(130),
            FieldDef::optional_enum("hair_color", EnumKind::HairColor),
            FieldDef::optional_bool("is_married"),
            FieldDef::required_string("password").min_length(8),
        ],
    )
}

fn location_shape() -> Shape {
    Shape::new(
        ShapeName::Location,
        vec![
            FieldDef::required_string("city").length(0, 60),
            FieldDef::required_string("state").length(0, 60),
            FieldDef::required_string("country").length(0, 60),
        ],
    )
}

// Query parameters of the person details lookup.
fn person_query_shape() -> Shape {
    Shape::new(
        ShapeName::PersonQuery,
        vec![
            FieldDef::required_string("name").length(1, 50),
            FieldDef::required_string("last_name").length(1, 50),
            FieldDef::optional_int("age").ge(1).le(130),
        ],
    )
}

fn contact_form_shape() -> Shape {
    Shape::new(
        ShapeName::ContactForm,
        vec![
            FieldDef::required_string("first_name").length(1, 20),
            FieldDef::required_string("last_name").length(1, 20),
            FieldDef::required_email("email"),
            FieldDef::required_string("message").min_length(20),
            FieldDef::optional_string("user_agent"),
            FieldDef::optional_string("ads"),
        ],
    )
}
