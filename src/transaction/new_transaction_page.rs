use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    AppState, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, base, dollar_input_styles,
        loading_spinner,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

use super::core::{Category, TransactionKind};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    new_transaction_view(today).into_response()
}

/// Swaps the visible category select when the transaction kind changes, the
/// way the category dropdown follows the income/expense choice in the form.
/// Disabled selects are not submitted, so exactly one `category` field is
/// ever sent.
const CATEGORY_TOGGLE_SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', function() {
    const update = () => {
        const kind = document.querySelector('input[name="kind"]:checked').value;
        document.querySelectorAll('select[name="category"]').forEach((select) => {
            const active = select.dataset.kind === kind;
            select.disabled = !active;
            select.closest('div').hidden = !active;
        });
    };
    document.querySelectorAll('input[name="kind"]').forEach((radio) => {
        radio.addEventListener('change', update);
    });
    update();
});
"#;

fn new_transaction_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white"
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl py-4"
            {
                "Add Transaction"
            }

            form
                class="space-y-4 md:space-y-6 w-full"
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
            {
                fieldset class=(FORM_RADIO_GROUP_STYLE)
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    (kind_radio(TransactionKind::Expense, true))
                    (kind_radio(TransactionKind::Income, false))
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            type="number"
                            name="amount"
                            id="amount"
                            class=(FORM_TEXT_INPUT_STYLE)
                            min="0.01"
                            step="0.01"
                            placeholder="0.00"
                            required
                            autofocus;
                    }
                }

                (category_select(TransactionKind::Expense))
                (category_select(TransactionKind::Income))

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        type="date"
                        name="date"
                        id="date"
                        class=(FORM_TEXT_INPUT_STYLE)
                        value=(today)
                        required;
                }

                fieldset class=(FORM_RADIO_GROUP_STYLE)
                {
                    legend class=(FORM_LABEL_STYLE) { "Frequency" }

                    label class="flex items-center gap-3"
                    {
                        input
                            type="radio"
                            name="frequency"
                            value="once"
                            class=(FORM_RADIO_INPUT_STYLE)
                            checked;
                        span class=(FORM_RADIO_LABEL_STYLE) { "One-time" }
                    }

                    label class="flex items-center gap-3"
                    {
                        input
                            type="radio"
                            name="frequency"
                            value="monthly"
                            class=(FORM_RADIO_INPUT_STYLE);
                        span class=(FORM_RADIO_LABEL_STYLE) { "Monthly recurring" }
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description (optional)" }

                    input
                        type="text"
                        name="description"
                        id="description"
                        class=(FORM_TEXT_INPUT_STYLE)
                        placeholder="What was this for?";
                }

                button
                    type="submit"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                    "Add Transaction"
                }
            }
        }
    );

    let head_elements = [
        dollar_input_styles(),
        HeadElement::ScriptSource(PreEscaped(CATEGORY_TOGGLE_SCRIPT.to_owned())),
    ];

    base("Add Transaction", &head_elements, &content)
}

fn kind_radio(kind: TransactionKind, checked: bool) -> Markup {
    html!(
        label class="flex items-center gap-3"
        {
            input
                type="radio"
                name="kind"
                value=(kind)
                class=(FORM_RADIO_INPUT_STYLE)
                checked[checked];
            span class=(FORM_RADIO_LABEL_STYLE) { (kind.label()) }
        }
    )
}

fn category_select(kind: TransactionKind) -> Markup {
    html!(
        div
        {
            label class=(FORM_LABEL_STYLE) { "Category" }

            select
                name="category"
                data-kind=(kind)
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::allowed(kind) {
                    option value=(category) { (category) }
                }
            }
        }
    )
}

#[cfg(test)]
mod view_tests {
    use axum::{body::Body, extract::State, http::StatusCode, response::Response};
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        endpoints,
        transaction::core::{EXPENSE_CATEGORIES, INCOME_CATEGORIES},
    };

    use super::{NewTransactionPageState, get_new_transaction_page};

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let state = NewTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_new_transaction_page(State(state)).await;

        assert_status_ok(&response);
        let document = parse_html(response).await;
        assert_valid_html(&document);
        assert_correct_form(&document);
    }

    #[track_caller]
    fn assert_status_ok(response: &Response<Body>) {
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_correct_form(document: &Html) {
        let form_selector = Selector::parse("form").unwrap();
        let forms = document.select(&form_selector).collect::<Vec<_>>();
        assert_eq!(forms.len(), 1, "want 1 form, got {}", forms.len());

        let form = forms.first().unwrap();
        let hx_post = form.value().attr("hx-post");
        assert_eq!(
            hx_post,
            Some(endpoints::TRANSACTIONS_API),
            "want form with attribute hx-post=\"{}\", got {:?}",
            endpoints::TRANSACTIONS_API,
            hx_post
        );

        assert_amount_input(form);
        assert_kind_radios(form);
        assert_frequency_radios(form);
        assert_category_selects(form);
        assert_has_submit_button(form);
    }

    #[track_caller]
    fn assert_amount_input(form: &ElementRef) {
        let input_selector = Selector::parse("input[name='amount']").unwrap();
        let inputs = form.select(&input_selector).collect::<Vec<_>>();
        assert_eq!(inputs.len(), 1, "want 1 amount input, got {}", inputs.len());

        let input = inputs.first().unwrap();
        assert!(input.value().attr("required").is_some());
        assert_eq!(input.value().attr("min"), Some("0.01"));
        assert_eq!(input.value().attr("step"), Some("0.01"));
    }

    #[track_caller]
    fn assert_kind_radios(form: &ElementRef) {
        let radio_selector = Selector::parse("input[type='radio'][name='kind']").unwrap();
        let values: Vec<_> = form
            .select(&radio_selector)
            .map(|radio| radio.value().attr("value").unwrap_or_default())
            .collect();

        assert_eq!(values, vec!["expense", "income"]);
    }

    #[track_caller]
    fn assert_frequency_radios(form: &ElementRef) {
        let radio_selector = Selector::parse("input[type='radio'][name='frequency']").unwrap();
        let values: Vec<_> = form
            .select(&radio_selector)
            .map(|radio| radio.value().attr("value").unwrap_or_default())
            .collect();

        assert_eq!(values, vec!["once", "monthly"]);
    }

    #[track_caller]
    fn assert_category_selects(form: &ElementRef) {
        let select_selector = Selector::parse("select[name='category']").unwrap();
        let selects = form.select(&select_selector).collect::<Vec<_>>();
        assert_eq!(
            selects.len(),
            2,
            "want one category select per transaction kind, got {}",
            selects.len()
        );

        let option_selector = Selector::parse("option").unwrap();
        for select in selects {
            let want: &[&str] = match select.value().attr("data-kind") {
                Some("expense") => &EXPENSE_CATEGORIES,
                Some("income") => &INCOME_CATEGORIES,
                other => panic!("unexpected data-kind attribute: {other:?}"),
            };

            let options: Vec<_> = select
                .select(&option_selector)
                .map(|option| option.text().collect::<String>().trim().to_string())
                .collect();
            assert_eq!(options, want);
        }
    }

    #[track_caller]
    fn assert_has_submit_button(form: &ElementRef) {
        let button_selector = Selector::parse("button").unwrap();
        let buttons = form.select(&button_selector).collect::<Vec<_>>();
        assert_eq!(buttons.len(), 1, "want 1 button, got {}", buttons.len());
        let button_type = buttons.first().unwrap().value().attr("type");
        assert_eq!(
            button_type,
            Some("submit"),
            "want button with type=\"submit\", got {button_type:?}"
        );
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
