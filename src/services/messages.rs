use chrono::Utc;

use crate::domain::listing::Listing;
use crate::domain::message::NewMessage;
use crate::domain::notification::EmailNotification;
use crate::forms::messages::{SendMessageForm, SendMessagePayload};
use crate::notifications::Notifier;
use crate::repository::MessageWriter;

use super::{ServiceError, ServiceResult};

/// Outcome of the seller notification issued by [`send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Delivered,
    Failed(String),
}

/// Successful result of [`send_message`].
///
/// The message itself was stored; `notification` reports whether the seller
/// was also emailed. A failed notification does not turn the send into an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDelivery {
    pub notification: NotificationStatus,
}

/// Messaging workflow.
///
/// 1. Validates the draft; failures return `InvalidInput` before any network
///    call.
/// 2. Inserts the message addressed to the listing's seller.
/// 3. Emails the seller, whether or not the insert succeeded.
///
/// Only the insert decides the result: an insert failure returns
/// `PersistenceFailed`, a notification failure is reported through
/// [`MessageDelivery::notification`]. Nothing is deduplicated.
pub async fn send_message<R, N>(
    listing: &Listing,
    form: &SendMessageForm,
    repo: &R,
    notifier: &N,
) -> ServiceResult<MessageDelivery>
where
    R: MessageWriter,
    N: Notifier + ?Sized,
{
    let payload = SendMessagePayload::try_from(form)?;

    let message = NewMessage {
        listing_id: listing.id.clone(),
        message: payload.message,
        sender_email: payload.sender_email,
        seller_email: listing.seller_email.clone(),
        sent_at: Utc::now(),
    };

    let stored = repo.create_message(&message).await;
    if let Err(e) = &stored {
        log::error!("Failed to store message for listing {}: {e}", listing.id);
    }

    let notification = EmailNotification::new_message(
        &message.seller_email,
        Some(&message.sender_email),
        &message.message,
    );
    let notification = match notifier.send_email(&notification).await {
        Ok(()) => NotificationStatus::Delivered,
        Err(e) => {
            log::warn!(
                "Failed to notify seller of listing {} about a new message: {e}",
                listing.id
            );
            NotificationStatus::Failed(e.to_string())
        }
    };

    match stored {
        Ok(()) => Ok(MessageDelivery { notification }),
        Err(_) => Err(ServiceError::PersistenceFailed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{EmailAddress, ListingId, ListingPrice, ListingTitle};
    use crate::notifications::test::RecordingNotifier;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_listing() -> Listing {
        Listing {
            id: ListingId::new("17").unwrap(),
            title: ListingTitle::new("Bike").unwrap(),
            description: None,
            price: ListingPrice::new(150.0).unwrap(),
            category: Category::Vehicles,
            seller_email: EmailAddress::new("s@z.com").unwrap(),
            image_url: None,
            location: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    fn sample_form() -> SendMessageForm {
        SendMessageForm {
            sender_email: "x@y.com".to_string(),
            message: "Is this available?".to_string(),
        }
    }

    #[actix_web::test]
    async fn stores_message_and_notifies_seller() {
        let repo = TestRepository::new(vec![]);
        let notifier = RecordingNotifier::default();

        let delivery = send_message(&sample_listing(), &sample_form(), &repo, &notifier)
            .await
            .unwrap();

        assert_eq!(delivery.notification, NotificationStatus::Delivered);

        let messages = repo.created_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_email, "x@y.com");
        assert_eq!(messages[0].seller_email, "s@z.com");
        assert_eq!(messages[0].listing_id, "17");
        assert_eq!(messages[0].message, "Is this available?");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "s@z.com");
        assert!(sent[0].text.contains("x@y.com"));
        assert!(sent[0].text.ends_with("Is this available?"));
    }

    #[actix_web::test]
    async fn insert_failure_keeps_draft_and_still_notifies() {
        let repo = TestRepository::new(vec![]).failing_inserts();
        let notifier = RecordingNotifier::default();
        let mut draft = sample_form();

        let result = send_message(&sample_listing(), &draft, &repo, &notifier).await;
        draft.settle(result.is_ok());

        assert_eq!(result.unwrap_err(), ServiceError::PersistenceFailed);
        assert_eq!(draft, sample_form());
        assert_eq!(repo.created_messages().len(), 1);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[actix_web::test]
    async fn success_clears_draft() {
        let repo = TestRepository::new(vec![]);
        let notifier = RecordingNotifier::default();
        let mut draft = sample_form();

        let result = send_message(&sample_listing(), &draft, &repo, &notifier).await;
        draft.settle(result.is_ok());

        assert!(result.is_ok());
        assert_eq!(draft, SendMessageForm::default());
    }

    #[actix_web::test]
    async fn notification_failure_does_not_fail_the_send() {
        let repo = TestRepository::new(vec![]);
        let notifier = RecordingNotifier::failing();

        let delivery = send_message(&sample_listing(), &sample_form(), &repo, &notifier)
            .await
            .unwrap();

        assert!(matches!(
            delivery.notification,
            NotificationStatus::Failed(_)
        ));
        assert_eq!(repo.created_messages().len(), 1);
    }

    #[actix_web::test]
    async fn blank_input_is_rejected_without_side_effects() {
        let repo = TestRepository::new(vec![]);
        let notifier = RecordingNotifier::default();
        let form = SendMessageForm {
            sender_email: "x@y.com".to_string(),
            message: "  ".to_string(),
        };

        let err = send_message(&sample_listing(), &form, &repo, &notifier)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(repo.network_calls(), 0);
        assert!(notifier.sent().is_empty());
    }

    #[actix_web::test]
    async fn resubmitting_duplicates_message_and_notification() {
        let repo = TestRepository::new(vec![]);
        let notifier = RecordingNotifier::default();

        for _ in 0..2 {
            send_message(&sample_listing(), &sample_form(), &repo, &notifier)
                .await
                .unwrap();
        }

        assert_eq!(repo.created_messages().len(), 2);
        assert_eq!(notifier.sent().len(), 2);
    }
}
