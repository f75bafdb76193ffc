use crate::member::config::StorageConfig;
use crate::member::image::{ImageFormat, ImageStatus, inspect_image};
use crate::member::record::{COLUMNS, MemberRecord};
use crate::member::store::MemberStore;
use crate::member::submission::{UploadedImage, submit_member as record_member};
use crate::tools::{log_error, log_error_and_message};
use crate::web::frontend::member_card::build_member_cards;
use crate::web::frontend::member_form::{FormValues, MemberForm};
use log::debug;
use rocket::form::{Contextual, Form};
use rocket::fs::{NamedFile, TempFile};
use rocket::http::{ContentType, Status};
use rocket::tokio::io::AsyncReadExt;
use rocket::{Request, State};
use rocket_dyn_templates::{Template, context};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

const TITLE: &str = "Membership Form";
const SUCCESS_MESSAGE: &str = "Data submitted successfully!";
const INVALID_FORM_MESSAGE: &str = "Please correct the following fields.";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum MessageKind {
    Success,
    Error,
}

/// Outcome of a submission, shown above the form.
#[derive(Debug, Serialize)]
struct Message {
    kind: MessageKind,
    text: String,
    details: Vec<String>,
}

impl Message {
    fn success(text: &str) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.to_owned(),
            details: vec![],
        }
    }

    fn error(text: String, details: Vec<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text,
            details,
        }
    }
}

#[get("/?<show_images>")]
pub async fn index(
    store: &State<Mutex<MemberStore>>,
    show_images: Option<bool>,
) -> Result<Template, Status> {
    let store = lock(store)?;
    Ok(render_page(
        &store,
        FormValues::default(),
        None,
        show_images.unwrap_or(false),
    ))
}

/// Record the member described by the form, then render the page again.
/// On success, the form is emptied; otherwise, it keeps the values that have been sent.
#[post("/?<show_images>", data = "<form>")]
pub async fn submit_member<'r>(
    storage_config: &State<StorageConfig>,
    store: &State<Mutex<MemberStore>>,
    show_images: Option<bool>,
    form: Form<Contextual<'r, MemberForm<'r>>>,
) -> Result<(Status, Template), Status> {
    let show_images = show_images.unwrap_or(false);
    let member_form = match form.into_inner() {
        Contextual {
            value: Some(member_form),
            ..
        } => member_form,
        Contextual {
            value: None,
            context,
        } => {
            let details = context
                .errors()
                .map(|error| match &error.name {
                    Some(name) => format!("{name}: {}", error.kind),
                    None => error.kind.to_string(),
                })
                .collect::<Vec<_>>();
            debug!("Member form can't be parsed: {details:?}");
            let store = lock(store)?;
            let message = Message::error(INVALID_FORM_MESSAGE.to_owned(), details);
            return Ok((
                Status::UnprocessableEntity,
                render_page(
                    &store,
                    FormValues::from_context(&context),
                    Some(message),
                    show_images,
                ),
            ));
        }
    };

    let values = member_form.values();
    let (record, image) = member_form.into_record();
    let image = read_uploaded_image(image).await?;

    let mut store = lock(store)?;
    match record_member(&mut store, storage_config.images_folder(), record, image) {
        Ok(_) => Ok((
            Status::Ok,
            render_page(
                &store,
                FormValues::default(),
                Some(Message::success(SUCCESS_MESSAGE)),
                show_images,
            ),
        )),
        Err(error) => {
            let status = if error.is_validation_error() {
                Status::UnprocessableEntity
            } else {
                Status::InternalServerError
            };
            let message = Message::error(error.to_string(), vec![]);
            Ok((status, render_page(&store, values, Some(message), show_images)))
        }
    }
}

/// Serve the image of the member at `index`, if it can be displayed.
/// The content type is the one of the decoded image, whatever the file extension.
#[get("/members/<index>/image")]
pub async fn member_image(
    store: &State<Mutex<MemberStore>>,
    index: usize,
) -> Option<(ContentType, NamedFile)> {
    let (image_path, format) = find_displayable_image(store, index)?;
    let content_type = match format {
        ImageFormat::Jpeg => ContentType::JPEG,
        ImageFormat::Png => ContentType::PNG,
    };
    let file = NamedFile::open(image_path).await.ok()?;
    Some((content_type, file))
}

#[catch(404)]
pub async fn not_found(req: &Request<'_>) -> Template {
    Template::render(
        "error/404",
        context! {
            title: "Page not found",
            uri: req.uri()
        },
    )
}

fn lock(store: &Mutex<MemberStore>) -> Result<MutexGuard<'_, MemberStore>, Status> {
    store
        .lock()
        .map_err(log_error(Status::InternalServerError))
}

fn find_displayable_image(
    store: &Mutex<MemberStore>,
    index: usize,
) -> Option<(String, ImageFormat)> {
    let store = lock(store).ok()?;
    let image_path = store.records().get(index)?.image_path();
    match inspect_image(image_path) {
        ImageStatus::Available(format) => Some((image_path.clone(), format)),
        ImageStatus::NotProvided | ImageStatus::NotFound | ImageStatus::Undecodable => None,
    }
}

/// Read the uploaded image in memory. An empty upload is the same as no upload at all.
async fn read_uploaded_image(image: Option<TempFile<'_>>) -> Result<Option<UploadedImage>, Status> {
    let Some(image) = image.filter(|image| image.len() > 0) else {
        return Ok(None);
    };

    let name = image
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_owned())
        .unwrap_or_default();
    let reader = image.open().await.map_err(log_error_and_message(
        "Can't open uploaded image",
        Status::InternalServerError,
    ))?;
    rocket::tokio::pin!(reader);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(log_error_and_message(
            "Can't read uploaded image",
            Status::InternalServerError,
        ))?;

    Ok(Some(UploadedImage::new(name, bytes)))
}

fn render_page(
    store: &MemberStore,
    values: FormValues,
    message: Option<Message>,
    show_images: bool,
) -> Template {
    let rows = store
        .records()
        .iter()
        .map(MemberRecord::cells)
        .collect::<Vec<_>>();
    let cards = if show_images {
        build_member_cards(store.records())
    } else {
        vec![]
    };

    Template::render(
        "index",
        context! {
            title: TITLE,
            columns: COLUMNS,
            rows: rows,
            cards: cards,
            show_images: show_images,
            values: values,
            message: message,
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::member::config::StorageConfig;
    use crate::member::image::create_images_folder;
    use crate::member::image::tests::{corrupted_jpeg_bytes, jpeg_bytes, png_bytes};
    use crate::member::store::MemberStore;
    use crate::tools::test::tests::temp_dir;
    use crate::web::frontend::server::configure;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    const BOUNDARY: &str = "X-MEMBERSHIP-FORM-BOUNDARY";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    async fn create_client(members_file: &Path, images_folder: &Path) -> Client {
        init();
        create_images_folder(images_folder).unwrap();
        let store = MemberStore::load(members_file).unwrap();
        let storage_config =
            StorageConfig::new(members_file.to_path_buf(), images_folder.to_path_buf());
        let rocket = configure(
            rocket::build()
                .manage(storage_config)
                .manage(Mutex::new(store)),
        );
        Client::tracked(rocket).await.unwrap()
    }

    fn stored_records_count(client: &Client) -> usize {
        client
            .rocket()
            .state::<Mutex<MemberStore>>()
            .unwrap()
            .lock()
            .unwrap()
            .records()
            .len()
    }

    fn jane_doe_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("id", "007"),
            ("last_name", "Doe"),
            ("first_name", "Jane"),
            ("middle_name", "Marie"),
            ("date_of_birth", "1990-04-12"),
            ("place_of_birth", "Manila"),
            ("nationality", "Filipino"),
            ("age", "34"),
            ("sex", "Female"),
            ("home_address", "12 Rizal Street"),
            ("contact_number_1", "0917123456"),
            ("contact_number_2", ""),
            ("position_rank", "Deaconess"),
            ("occupation", "Nurse"),
            ("marital_status", "Married"),
            ("spouse_name", "John Doe"),
            ("date_of_marriage", "2015-06-20"),
            ("born_again", "Yes"),
            ("baptized", "Yes"),
            ("membership_type", "Full Membership"),
            ("joined_year", "2010"),
            ("email", "jane.doe@example.com"),
            ("emergency_contact_name", "John Doe"),
            ("emergency_contact_cell", "0917654321"),
        ]
    }

    fn with_field(
        mut fields: Vec<(&'static str, &'static str)>,
        name: &str,
        value: &'static str,
    ) -> Vec<(&'static str, &'static str)> {
        fields
            .iter_mut()
            .filter(|(field_name, _)| *field_name == name)
            .for_each(|(_, field_value)| *field_value = value);
        fields
    }

    fn url_encode(fields: &[(&str, &str)]) -> String {
        fields
            .iter()
            .map(|(name, value)| {
                let value = value
                    .bytes()
                    .map(|byte| {
                        if byte.is_ascii_alphanumeric() || b"-_.~".contains(&byte) {
                            (byte as char).to_string()
                        } else {
                            format!("%{byte:02X}")
                        }
                    })
                    .collect::<String>();
                format!("{name}={value}")
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn multipart(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_content_type() -> ContentType {
        ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY))
    }

    // region index
    #[async_test]
    async fn should_render_empty_page() {
        let folder = temp_dir();
        let client =
            create_client(&folder.join("membership_info.csv"), &folder.join("images")).await;

        let response = client.get("/").dispatch().await;

        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Membership Information"));
        assert!(body.contains("Emergency Contact Cell"));
        assert!(!body.contains("No valid image available."));
    }
    // endregion

    // region submit_member
    #[async_test]
    async fn should_submit_member() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;

        let response = client
            .post("/")
            .header(ContentType::Form)
            .body(url_encode(&jane_doe_fields()))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Data submitted successfully!"));
        assert!(body.contains("<td>007</td>"));
        assert_eq!(1, stored_records_count(&client));
        let reloaded = MemberStore::load(&members_file).unwrap();
        assert_eq!("007", reloaded.records()[0].id());
        assert_eq!("", reloaded.records()[0].image_path());
    }

    #[async_test]
    async fn should_accept_duplicated_ids() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;

        for first_name in ["Jane", "Janet"] {
            let fields = with_field(jane_doe_fields(), "first_name", first_name);
            let response = client
                .post("/")
                .header(ContentType::Form)
                .body(url_encode(&fields))
                .dispatch()
                .await;
            assert_eq!(Status::Ok, response.status());
        }

        let reloaded = MemberStore::load(&members_file).unwrap();
        let first_names = reloaded
            .records()
            .iter()
            .map(|record| record.first_name().as_str())
            .collect::<Vec<_>>();
        assert_eq!(vec!["Jane", "Janet"], first_names);
        assert!(reloaded.records().iter().all(|record| record.id() == "007"));
    }

    #[async_test]
    async fn should_refuse_member_with_missing_required_field() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;
        let fields = with_field(jane_doe_fields(), "email", "");

        let response = client
            .post("/")
            .header(ContentType::Form)
            .body(url_encode(&fields))
            .dispatch()
            .await;

        assert_eq!(Status::UnprocessableEntity, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Please fill in all required fields: Email."));
        assert!(body.contains("value=\"Doe\""));
        assert_eq!(0, stored_records_count(&client));
        assert!(!fs::exists(&members_file).unwrap());
    }

    #[async_test]
    async fn should_refuse_age_out_of_range() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;
        let fields = with_field(jane_doe_fields(), "age", "130");

        let response = client
            .post("/")
            .header(ContentType::Form)
            .body(url_encode(&fields))
            .dispatch()
            .await;

        assert_eq!(Status::UnprocessableEntity, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Please correct the following fields."));
        assert!(body.contains("value=\"130\""));
        assert_eq!(0, stored_records_count(&client));
    }

    #[async_test]
    async fn should_submit_member_with_image() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let images_folder = folder.join("images");
        let client = create_client(&members_file, &images_folder).await;
        let jpeg = jpeg_bytes();

        let response = client
            .post("/?show_images=true")
            .header(multipart_content_type())
            .body(multipart(&jane_doe_fields(), Some(("jane.jpg", jpeg.as_slice()))))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Name: Jane Doe, Age: 34, Email: jane.doe@example.com"));
        assert!(!body.contains("No valid image available."));

        let expected_path = images_folder.join("jane.jpg");
        assert_eq!(jpeg, fs::read(&expected_path).unwrap());
        let reloaded = MemberStore::load(&members_file).unwrap();
        assert_eq!(
            &expected_path.display().to_string(),
            reloaded.records()[0].image_path()
        );

        let response = client.get("/members/0/image").dispatch().await;
        assert_eq!(Status::Ok, response.status());
        assert_eq!(Some(ContentType::JPEG), response.content_type());
        assert_eq!(Some(jpeg), response.into_bytes().await);
    }

    #[async_test]
    async fn should_treat_empty_upload_as_no_image() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;

        let response = client
            .post("/")
            .header(multipart_content_type())
            .body(multipart(&jane_doe_fields(), Some(("", b""))))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let reloaded = MemberStore::load(&members_file).unwrap();
        assert_eq!("", reloaded.records()[0].image_path());
    }

    #[async_test]
    async fn should_refuse_unsupported_image() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;

        let response = client
            .post("/")
            .header(multipart_content_type())
            .body(multipart(&jane_doe_fields(), Some(("jane.gif", b"GIF89a"))))
            .dispatch()
            .await;

        assert_eq!(Status::UnprocessableEntity, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Only jpg, jpeg and png images are accepted."));
        assert_eq!(0, stored_records_count(&client));
    }

    #[async_test]
    async fn should_keep_member_in_memory_when_file_cant_be_written() {
        let folder = temp_dir();
        let members_file = folder.join("missing-folder").join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;

        let response = client
            .post("/")
            .header(ContentType::Form)
            .body(url_encode(&jane_doe_fields()))
            .dispatch()
            .await;

        assert_eq!(Status::InternalServerError, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("The members file can"));
        assert!(body.contains("<td>007</td>"));
        assert_eq!(1, stored_records_count(&client));
    }
    // endregion

    // region show images
    #[async_test]
    async fn should_show_placeholder_when_no_image() {
        let folder = temp_dir();
        let client =
            create_client(&folder.join("membership_info.csv"), &folder.join("images")).await;
        client
            .post("/")
            .header(ContentType::Form)
            .body(url_encode(&jane_doe_fields()))
            .dispatch()
            .await;

        let response = client.get("/?show_images=true").dispatch().await;

        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("Name: Jane Doe, Age: 34, Email: jane.doe@example.com"));
        assert!(body.contains("No valid image available."));
    }

    #[async_test]
    async fn should_serve_image_with_decoded_content_type() {
        let folder = temp_dir();
        let client =
            create_client(&folder.join("membership_info.csv"), &folder.join("images")).await;
        client
            .post("/")
            .header(multipart_content_type())
            .body(multipart(&jane_doe_fields(), Some(("jane.jpg", png_bytes().as_slice()))))
            .dispatch()
            .await;

        let response = client.get("/members/0/image").dispatch().await;

        assert_eq!(Status::Ok, response.status());
        assert_eq!(Some(ContentType::PNG), response.content_type());
    }

    #[async_test]
    async fn should_show_placeholder_when_image_cant_be_decoded() {
        let folder = temp_dir();
        let members_file = folder.join("membership_info.csv");
        let client = create_client(&members_file, &folder.join("images")).await;
        let response = client
            .post("/")
            .header(multipart_content_type())
            .body(multipart(
                &jane_doe_fields(),
                Some(("jane.jpg", corrupted_jpeg_bytes().as_slice())),
            ))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let response = client.get("/?show_images=true").dispatch().await;

        assert_eq!(Status::Ok, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("No valid image available."));
        assert!(!body.contains("/members/0/image"));
        let response = client.get("/members/0/image").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[async_test]
    async fn should_not_find_image_of_unknown_member() {
        let folder = temp_dir();
        let client =
            create_client(&folder.join("membership_info.csv"), &folder.join("images")).await;

        let response = client.get("/members/3/image").dispatch().await;

        assert_eq!(Status::NotFound, response.status());
    }
    // endregion

    #[async_test]
    async fn should_render_not_found_page() {
        let folder = temp_dir();
        let client =
            create_client(&folder.join("membership_info.csv"), &folder.join("images")).await;

        let response = client.get("/does/not/exist").dispatch().await;

        assert_eq!(Status::NotFound, response.status());
        assert!(
            response
                .into_string()
                .await
                .unwrap()
                .contains("Page not found")
        );
    }
}
